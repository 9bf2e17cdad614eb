//! Core types for the groundwater well inventory.
//!
//! Nothing in this crate touches storage. It defines the well and
//! hydrograph records, decodes GeoJSON well locations, validates
//! registration input and parses uploaded hydrograph files.

pub mod hydrograph;
pub mod location;
pub mod well;
