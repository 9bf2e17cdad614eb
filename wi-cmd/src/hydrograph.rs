//! Hydrograph upload and plot commands.

use anyhow::Context;
use log::info;
use std::io::Write;
use std::path::Path;
use wi_db::Database;

/// Replace a well's hydrograph with the contents of `file`.
///
/// The file is read as raw bytes; decoding and line parsing happen in
/// [`Database::ingest_hydrograph`].
pub fn run_upload(
    db: &mut Database,
    well_id: i64,
    file: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let payload =
        std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    info!("Uploading {} bytes for well {}", payload.len(), well_id);

    let report = db
        .ingest_hydrograph(well_id, &payload)
        .with_context(|| format!("uploading {} for well {}", file.display(), well_id))?;
    writeln!(
        out,
        "Loaded {} point(s) into hydrograph {} of well {}",
        report.points_loaded, report.hydrograph_id, report.well_id
    )?;
    if report.lines_skipped > 0 {
        writeln!(out, "Skipped {} malformed line(s)", report.lines_skipped)?;
    }
    Ok(())
}

/// Print the plot data of a hydrograph, found by id or through its well.
///
/// Prints `null` when the well has no hydrograph yet.
pub fn run_plot(
    db: &Database,
    well_id: Option<i64>,
    hydrograph_id: Option<i64>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let hydrograph_id = match (hydrograph_id, well_id) {
        (Some(id), _) => Some(id),
        (None, Some(well_id)) => {
            if db.query_well(well_id)?.is_none() {
                anyhow::bail!("well {} does not exist", well_id);
            }
            db.query_hydrograph_id(well_id)?
        }
        (None, None) => anyhow::bail!("either a well id or a hydrograph id is required"),
    };

    let plot = match hydrograph_id {
        Some(id) => {
            let plot = db.query_hydrograph_plot(id)?;
            if plot.is_none() {
                anyhow::bail!("hydrograph {} does not exist", id);
            }
            plot
        }
        None => {
            info!("Well has no hydrograph yet");
            None
        }
    };
    serde_json::to_writer_pretty(&mut *out, &plot)?;
    writeln!(out)?;
    Ok(())
}
