//! GeoJSON well locations.
//!
//! The map drawing tool submits a well's location as a GeoJSON
//! `GeometryCollection` holding a single `Point`:
//!
//! ```text
//! {"type": "GeometryCollection",
//!  "geometries": [{"type": "Point", "coordinates": [-111.529133, 40.406624]}]}
//! ```
//!
//! Only the first geometry is read. GeoJSON orders coordinates as
//! `[longitude, latitude]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Longitude/latitude pair in decimal degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

/// Ways a submitted location can fail to yield a point.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location is not valid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("location contains no geometries")]
    NoGeometry,

    #[error("geometry has no type")]
    MissingType,

    #[error("expected a Point geometry, found {0}")]
    NotAPoint(String),

    #[error("point needs numeric longitude and latitude coordinates")]
    MissingCoordinates,
}

#[derive(Deserialize)]
struct GeometryCollection {
    #[serde(default)]
    geometries: Vec<Geometry>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    coordinates: Value,
}

impl Location {
    /// Decode the first point geometry of a GeoJSON geometry collection.
    ///
    /// Missing keys, an empty collection, a geometry whose `type` is absent
    /// or not `Point`, and fewer than two numeric coordinates are reported
    /// as [`LocationError`]s.
    pub fn from_geojson(geojson: &str) -> Result<Location, LocationError> {
        let collection: GeometryCollection = serde_json::from_str(geojson)?;
        let geometry = collection
            .geometries
            .first()
            .ok_or(LocationError::NoGeometry)?;

        match geometry.kind.as_deref() {
            Some("Point") => {}
            Some(kind) => return Err(LocationError::NotAPoint(kind.to_string())),
            None => return Err(LocationError::MissingType),
        }

        let coordinates = geometry
            .coordinates
            .as_array()
            .ok_or(LocationError::MissingCoordinates)?;
        match (
            coordinates.first().and_then(Value::as_f64),
            coordinates.get(1).and_then(Value::as_f64),
        ) {
            (Some(longitude), Some(latitude)) => Ok(Location {
                longitude,
                latitude,
            }),
            _ => Err(LocationError::MissingCoordinates),
        }
    }
}
