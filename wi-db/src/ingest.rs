//! Hydrograph ingestion: replace a well's point set from an uploaded file.
//!
//! The whole replacement runs in one transaction. Any error before the
//! commit drops the transaction, which rolls it back, so a failed upload
//! never changes what is stored.

use crate::Database;
use rusqlite::{params, OptionalExtension, Transaction};
use thiserror::Error;
use wi_core::hydrograph::{parse_hydrograph, HydrographFileError, HydrographPoint};

/// Outcome of a successful ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub well_id: i64,
    pub hydrograph_id: i64,
    pub points_loaded: usize,
    /// Malformed lines dropped from the upload
    pub lines_skipped: usize,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("hydrograph file is not valid UTF-8: {0}")]
    InvalidEncoding(std::str::Utf8Error),

    #[error("no valid time,flow records found ({lines_skipped} line(s) skipped)")]
    NoValidPoints { lines_skipped: usize },

    #[error("well {0} does not exist")]
    WellNotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl From<HydrographFileError> for IngestError {
    fn from(err: HydrographFileError) -> Self {
        match err {
            HydrographFileError::InvalidEncoding(e) => IngestError::InvalidEncoding(e),
        }
    }
}

impl Database {
    /// Parse an uploaded hydrograph file and make it the well's hydrograph.
    ///
    /// The well gets a hydrograph on its first successful ingestion; later
    /// ingestions keep that hydrograph and swap all of its points.
    /// Malformed lines are dropped and counted in the report. A payload
    /// without a single valid line fails before the store is touched.
    pub fn ingest_hydrograph(
        &mut self,
        well_id: i64,
        payload: &[u8],
    ) -> Result<IngestReport, IngestError> {
        let parsed = parse_hydrograph(payload).map_err(|e| {
            log::warn!("ingest: rejected upload for well {}: {}", well_id, e);
            e
        })?;
        if parsed.is_empty() {
            log::warn!(
                "ingest: no valid records for well {} ({} line(s) skipped)",
                well_id,
                parsed.lines_skipped
            );
            return Err(IngestError::NoValidPoints {
                lines_skipped: parsed.lines_skipped,
            });
        }
        if parsed.lines_skipped > 0 {
            log::warn!(
                "ingest: skipped {} malformed line(s) for well {}",
                parsed.lines_skipped,
                well_id
            );
        }

        let tx = self.conn.transaction()?;
        let hydrograph_id = replace_points(&tx, well_id, &parsed.points).map_err(|e| {
            match &e {
                IngestError::Storage(err) => log::error!("ingest: well {}: {}", well_id, err),
                other => log::warn!("ingest: {}", other),
            }
            e
        })?;
        tx.commit().map_err(|e| {
            log::error!("ingest: commit failed for well {}: {}", well_id, e);
            e
        })?;

        log::info!(
            "ingest: loaded {} points into hydrograph {} of well {}",
            parsed.points.len(),
            hydrograph_id,
            well_id
        );
        Ok(IngestReport {
            well_id,
            hydrograph_id,
            points_loaded: parsed.points.len(),
            lines_skipped: parsed.lines_skipped,
        })
    }
}

fn replace_points(
    tx: &Transaction<'_>,
    well_id: i64,
    points: &[HydrographPoint],
) -> Result<i64, IngestError> {
    let well_exists: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM wells WHERE id = ?1)",
        params![well_id],
        |row| row.get(0),
    )?;
    if !well_exists {
        return Err(IngestError::WellNotFound(well_id));
    }

    let existing: Option<i64> = tx
        .query_row(
            "SELECT id FROM hydrographs WHERE well_id = ?1",
            params![well_id],
            |row| row.get(0),
        )
        .optional()?;
    let hydrograph_id = match existing {
        Some(id) => id,
        None => {
            tx.execute(
                "INSERT INTO hydrographs (well_id) VALUES (?1)",
                params![well_id],
            )?;
            tx.last_insert_rowid()
        }
    };

    let removed = tx.execute(
        "DELETE FROM hydrograph_points WHERE hydrograph_id = ?1",
        params![hydrograph_id],
    )?;
    log::debug!(
        "ingest: removed {} old points from hydrograph {}",
        removed,
        hydrograph_id
    );

    let mut stmt = tx.prepare(
        "INSERT INTO hydrograph_points (hydrograph_id, time, flow) VALUES (?1, ?2, ?3)",
    )?;
    for point in points {
        stmt.execute(params![hydrograph_id, point.time, point.flow])?;
    }
    Ok(hydrograph_id)
}
