//! Command implementations for the well inventory CLI.
//!
//! Each subcommand opens the database, runs one operation and drops the
//! connection before returning. Results are written to stdout: CSV for the
//! well table, JSON for the map layer and hydrograph plots.

use clap::{ArgGroup, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod config;
pub mod hydrograph;
pub mod wells;

#[derive(Subcommand)]
pub enum Command {
    /// Create the database, seeding it with example wells the first time
    Init {
        /// Do not insert the example wells
        #[arg(long)]
        no_seed: bool,
    },

    /// Register a new well
    AddWell {
        #[arg(long)]
        name: String,

        #[arg(long)]
        owner: String,

        #[arg(long)]
        river: String,

        /// Free text, e.g. "April 12, 1993"
        #[arg(long)]
        date_built: String,

        /// GeoJSON geometry collection holding the well's Point
        #[arg(short = 'l', long)]
        location: String,
    },

    /// Print all wells as CSV
    ListWells,

    /// Print all wells as a GeoJSON FeatureCollection (EPSG:4326)
    Map,

    /// Replace a well's hydrograph with the `time,flow` lines of a file
    UploadHydrograph {
        #[arg(short = 'w', long)]
        well_id: i64,

        /// Path of the hydrograph file
        file: PathBuf,
    },

    /// Print the plot data of a hydrograph as JSON
    #[command(group(
        ArgGroup::new("target")
            .required(true)
            .args(["well_id", "hydrograph_id"])
    ))]
    Hydrograph {
        /// Resolve the hydrograph through its well
        #[arg(short = 'w', long)]
        well_id: Option<i64>,

        #[arg(long)]
        hydrograph_id: Option<i64>,
    },
}

/// Run a command against the database at `db_path`, writing to stdout.
pub fn run(db_path: &Path, command: Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(db_path, command, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Run a command, writing its output to `out`.
pub fn run_with_output(
    db_path: &Path,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut db = config::open_database(db_path)?;
    match command {
        Command::Init { no_seed } => wells::run_init(&mut db, !no_seed, out),
        Command::AddWell {
            name,
            owner,
            river,
            date_built,
            location,
        } => {
            let form = wi_core::well::WellForm {
                name,
                owner,
                river,
                date_built,
                location,
            };
            wells::run_add_well(&db, &form, out)
        }
        Command::ListWells => wells::run_list_wells(&db, out),
        Command::Map => wells::run_map(&db, out),
        Command::UploadHydrograph { well_id, file } => {
            hydrograph::run_upload(&mut db, well_id, &file, out)
        }
        Command::Hydrograph {
            well_id,
            hydrograph_id,
        } => hydrograph::run_plot(&db, well_id, hydrograph_id, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(db_path: &Path, command: Command) -> String {
        let mut out = Vec::new();
        run_with_output(db_path, command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn commands_share_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("wells.sqlite");

        run_to_string(&db_path, Command::Init { no_seed: true });
        run_to_string(
            &db_path,
            Command::AddWell {
                name: "Mill Hollow".to_string(),
                owner: "Wasatch County".to_string(),
                river: "Weber River".to_string(),
                date_built: "1967".to_string(),
                location: r#"{"geometries":[{"type":"Point","coordinates":[-111.1,40.5]}]}"#
                    .to_string(),
            },
        );

        let hydrograph_file = dir.path().join("hydrograph.csv");
        std::fs::write(&hydrograph_file, "0,12.5\n1,13.0\nbad-line\n2,11.8").unwrap();
        run_to_string(
            &db_path,
            Command::UploadHydrograph {
                well_id: 1,
                file: hydrograph_file,
            },
        );

        let table = run_to_string(&db_path, Command::ListWells);
        let mut lines = table.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,owner,river,date_built,latitude,longitude,hydrograph_id")
        );
        assert_eq!(
            lines.next(),
            Some("1,Mill Hollow,Wasatch County,Weber River,1967,40.5,-111.1,1")
        );
        assert_eq!(lines.next(), None);

        let plot: serde_json::Value = serde_json::from_str(&run_to_string(
            &db_path,
            Command::Hydrograph {
                well_id: Some(1),
                hydrograph_id: None,
            },
        ))
        .unwrap();
        assert_eq!(plot["time"], serde_json::json!([0, 1, 2]));
        assert_eq!(plot["flow"], serde_json::json!([12.5, 13.0, 11.8]));
    }

    #[test]
    fn failed_upload_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("wells.sqlite");
        run_to_string(&db_path, Command::Init { no_seed: false });

        let hydrograph_file = dir.path().join("empty.csv");
        std::fs::write(&hydrograph_file, "").unwrap();
        let mut out = Vec::new();
        let result = run_with_output(
            &db_path,
            Command::UploadHydrograph {
                well_id: 1,
                file: hydrograph_file,
            },
            &mut out,
        );
        assert!(result.is_err());
    }
}
