//! Typed query methods for wells and hydrographs.
//!
//! Reads never modify the store, so calling any of them twice without an
//! intervening write returns the same result.

use crate::models::{HydrographPlot, WellFeatureCollection, WellRow};
use crate::Database;
use rusqlite::{params, OptionalExtension, Row};
use wi_core::hydrograph::{Hydrograph, HydrographPoint};
use wi_core::well::Well;

fn well_from_row(row: &Row<'_>) -> rusqlite::Result<Well> {
    Ok(Well {
        id: row.get(0)?,
        latitude: row.get(1)?,
        longitude: row.get(2)?,
        name: row.get(3)?,
        owner: row.get(4)?,
        river: row.get(5)?,
        date_built: row.get(6)?,
    })
}

impl Database {
    // ───────────────────── Well Queries ─────────────────────

    /// Get every well, ordered by id.
    pub fn query_wells(&self) -> anyhow::Result<Vec<Well>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, latitude, longitude, name, owner, river, date_built
             FROM wells
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], well_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_wells returned {} records", rows.len());
        Ok(rows)
    }

    /// Get a single well, or `None` if the id is unknown.
    pub fn query_well(&self, well_id: i64) -> anyhow::Result<Option<Well>> {
        let well = self
            .conn
            .query_row(
                "SELECT id, latitude, longitude, name, owner, river, date_built
                 FROM wells
                 WHERE id = ?1",
                params![well_id],
                well_from_row,
            )
            .optional()?;
        Ok(well)
    }

    /// Get the list view rows: every well with its hydrograph id, if any.
    pub fn query_well_rows(&self) -> anyhow::Result<Vec<WellRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT w.id, w.name, w.owner, w.river, w.date_built,
                    w.latitude, w.longitude, h.id
             FROM wells w
             LEFT JOIN hydrographs h ON h.well_id = w.id
             ORDER BY w.id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(WellRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    owner: row.get(2)?,
                    river: row.get(3)?,
                    date_built: row.get(4)?,
                    latitude: row.get(5)?,
                    longitude: row.get(6)?,
                    hydrograph_id: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_well_rows returned {} records", rows.len());
        Ok(rows)
    }

    /// Get all wells as a GeoJSON map layer.
    pub fn query_well_map(&self) -> anyhow::Result<WellFeatureCollection> {
        let features = self
            .query_well_rows()?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(WellFeatureCollection::new(features))
    }

    // ───────────────────── Hydrograph Queries ─────────────────────

    /// Resolve the hydrograph of a well. `None` when none was uploaded yet.
    pub fn query_hydrograph_id(&self, well_id: i64) -> anyhow::Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM hydrographs WHERE well_id = ?1",
                params![well_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Get a hydrograph record by id.
    pub fn query_hydrograph(&self, hydrograph_id: i64) -> anyhow::Result<Option<Hydrograph>> {
        let hydrograph = self
            .conn
            .query_row(
                "SELECT id, well_id FROM hydrographs WHERE id = ?1",
                params![hydrograph_id],
                |row| {
                    Ok(Hydrograph {
                        id: row.get(0)?,
                        well_id: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(hydrograph)
    }

    /// Get the points of a hydrograph ordered by time.
    ///
    /// Points sharing a time keep their upload order.
    pub fn query_hydrograph_points(
        &self,
        hydrograph_id: i64,
    ) -> anyhow::Result<Vec<HydrographPoint>> {
        let mut stmt = self.conn.prepare(
            "SELECT time, flow FROM hydrograph_points
             WHERE hydrograph_id = ?1
             ORDER BY time, id",
        )?;
        let rows = stmt
            .query_map(params![hydrograph_id], |row| {
                Ok(HydrographPoint {
                    time: row.get(0)?,
                    flow: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_hydrograph_points returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Build the depth-to-groundwater plot of a hydrograph.
    ///
    /// Returns `None` if the hydrograph does not exist or is not attached
    /// to a well.
    pub fn query_hydrograph_plot(
        &self,
        hydrograph_id: i64,
    ) -> anyhow::Result<Option<HydrographPlot>> {
        let well = match self.query_hydrograph(hydrograph_id)? {
            Some(Hydrograph {
                well_id: Some(well_id),
                ..
            }) => self.query_well(well_id)?,
            _ => None,
        };
        let Some(well) = well else {
            return Ok(None);
        };

        let points = self.query_hydrograph_points(hydrograph_id)?;
        Ok(Some(HydrographPlot {
            hydrograph_id,
            well_id: well.id,
            title: format!("Depth to GW Hydrograph for {}", well.name),
            series_name: format!("Hydrograph for {}", well.name),
            x_axis_title: "Time (hr)",
            y_axis_title: "Depth to Groundwater (ft)",
            time: points.iter().map(|p| p.time).collect(),
            flow: points.iter().map(|p| p.flow).collect(),
        }))
    }
}
