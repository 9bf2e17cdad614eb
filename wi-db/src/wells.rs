//! Well registration.

use crate::Database;
use rusqlite::{params, Connection};
use thiserror::Error;
use wi_core::well::{NewWell, Well, WellError, WellForm};

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error(transparent)]
    Invalid(#[from] WellError),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// The two wells a fresh inventory is seeded with.
pub fn example_wells() -> Vec<NewWell> {
    vec![
        NewWell {
            latitude: 40.406624,
            longitude: -111.529133,
            name: "Deer Creek".to_string(),
            owner: "Reclamation".to_string(),
            river: "Provo River".to_string(),
            date_built: "April 12, 1993".to_string(),
        },
        NewWell {
            latitude: 40.598168,
            longitude: -111.424055,
            name: "Jordanelle".to_string(),
            owner: "Reclamation".to_string(),
            river: "Provo River".to_string(),
            date_built: "1941".to_string(),
        },
    ]
}

pub(crate) fn insert_well(conn: &Connection, well: &NewWell) -> rusqlite::Result<Well> {
    conn.execute(
        "INSERT INTO wells (latitude, longitude, name, owner, river, date_built)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            well.latitude,
            well.longitude,
            well.name,
            well.owner,
            well.river,
            well.date_built
        ],
    )?;
    Ok(Well {
        id: conn.last_insert_rowid(),
        latitude: well.latitude,
        longitude: well.longitude,
        name: well.name.clone(),
        owner: well.owner.clone(),
        river: well.river.clone(),
        date_built: well.date_built.clone(),
    })
}

impl Database {
    /// Validate an "add well" form and store exactly one new well.
    ///
    /// Nothing is written when a field is missing or the location cannot
    /// be decoded.
    pub fn register_well(&self, form: &WellForm) -> Result<Well, RegisterError> {
        let new_well = form.validate().map_err(|e| {
            log::warn!("wells: rejected registration: {}", e);
            e
        })?;
        let well = self.add_well(&new_well)?;
        Ok(well)
    }

    /// Store an already validated well.
    pub fn add_well(&self, well: &NewWell) -> rusqlite::Result<Well> {
        let well = insert_well(&self.conn, well).map_err(|e| {
            log::error!("wells: insert failed: {}", e);
            e
        })?;
        log::info!("wells: added well {} ({})", well.id, well.name);
        Ok(well)
    }
}
