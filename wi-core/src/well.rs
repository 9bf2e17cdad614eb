use crate::location::{Location, LocationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted groundwater well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Well {
    pub id: i64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    pub name: String,
    pub owner: String,
    pub river: String,
    /// Free text, e.g. "April 12, 1993" or "1941"
    pub date_built: String,
}

/// A validated well that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWell {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub owner: String,
    pub river: String,
    pub date_built: String,
}

/// Raw input of the "add well" form.
///
/// `location` carries the GeoJSON drawn on the map, see
/// [`Location::from_geojson`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WellForm {
    pub name: String,
    pub owner: String,
    pub river: String,
    pub date_built: String,
    pub location: String,
}

#[derive(Debug, Error)]
pub enum WellError {
    #[error("missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid location: {0}")]
    Location(#[from] LocationError),
}

impl WellForm {
    /// Check that every field is present and decode the location.
    ///
    /// All empty fields are reported together. Values are only checked
    /// for presence; coordinates are not range checked.
    pub fn validate(&self) -> Result<NewWell, WellError> {
        let fields = [
            ("name", &self.name),
            ("owner", &self.owner),
            ("river", &self.river),
            ("date_built", &self.date_built),
            ("location", &self.location),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(WellError::MissingFields(missing));
        }

        let location = Location::from_geojson(&self.location)?;
        Ok(NewWell {
            latitude: location.latitude,
            longitude: location.longitude,
            name: self.name.trim().to_string(),
            owner: self.owner.trim().to_string(),
            river: self.river.trim().to_string(),
            date_built: self.date_built.trim().to_string(),
        })
    }
}
