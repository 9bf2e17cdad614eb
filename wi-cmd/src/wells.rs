//! Well commands: initialization, registration, table and map output.

use anyhow::Context;
use log::info;
use std::io::Write;
use wi_core::well::WellForm;
use wi_db::Database;

/// Initialize the store, seeding the example wells on first use.
pub fn run_init(db: &mut Database, seed: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if db.initialize(seed)? {
        let count = db.query_wells()?.len();
        writeln!(out, "Initialized well inventory with {} well(s)", count)?;
    } else {
        writeln!(out, "Well inventory already initialized")?;
    }
    Ok(())
}

/// Register one well and print its id.
pub fn run_add_well(db: &Database, form: &WellForm, out: &mut impl Write) -> anyhow::Result<()> {
    let well = db
        .register_well(form)
        .with_context(|| format!("adding well '{}'", form.name))?;
    info!(
        "Added well {} at ({}, {})",
        well.id, well.latitude, well.longitude
    );
    writeln!(out, "Added well {} ({})", well.id, well.name)?;
    Ok(())
}

/// Write the well table as CSV with a header row.
pub fn run_list_wells(db: &Database, out: &mut impl Write) -> anyhow::Result<()> {
    let rows = db.query_well_rows()?;
    let mut wtr = csv::Writer::from_writer(out);
    for row in &rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the GeoJSON map layer of all wells.
pub fn run_map(db: &Database, out: &mut impl Write) -> anyhow::Result<()> {
    let map = db.query_well_map()?;
    serde_json::to_writer_pretty(&mut *out, &map)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_of(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn seeded_db() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.initialize(true).unwrap();
        db
    }

    #[test]
    fn init_reports_first_and_repeat_runs() {
        let mut db = Database::open_in_memory().unwrap();
        let first = output_of(|out| run_init(&mut db, true, out));
        assert_eq!(first, "Initialized well inventory with 2 well(s)\n");
        let second = output_of(|out| run_init(&mut db, true, out));
        assert_eq!(second, "Well inventory already initialized\n");
    }

    #[test]
    fn add_well_prints_new_id() {
        let db = Database::open_in_memory().unwrap();
        let form = WellForm {
            name: "Mill Hollow".to_string(),
            owner: "Wasatch County".to_string(),
            river: "Weber River".to_string(),
            date_built: "1967".to_string(),
            location: r#"{"geometries":[{"type":"Point","coordinates":[-111.1,40.5]}]}"#
                .to_string(),
        };
        let printed = output_of(|out| run_add_well(&db, &form, out));
        assert_eq!(printed, "Added well 1 (Mill Hollow)\n");
    }

    #[test]
    fn add_well_error_names_missing_fields() {
        let db = Database::open_in_memory().unwrap();
        let form = WellForm {
            name: "Mill Hollow".to_string(),
            ..WellForm::default()
        };
        let mut out = Vec::new();
        let err = run_add_well(&db, &form, &mut out).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("owner, river, date_built, location"), "{}", message);
        assert!(db.query_wells().unwrap().is_empty());
    }

    #[test]
    fn list_wells_writes_csv_rows() {
        let db = seeded_db();
        let csv = output_of(|out| run_list_wells(&db, out));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "1,Deer Creek,Reclamation,Provo River,\"April 12, 1993\",40.406624,-111.529133,"
        );
        assert_eq!(
            lines[2],
            "2,Jordanelle,Reclamation,Provo River,1941,40.598168,-111.424055,"
        );
    }

    #[test]
    fn map_writes_feature_collection() {
        let db = seeded_db();
        let json = output_of(|out| run_map(&db, out));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 2);
        assert_eq!(value["features"][1]["properties"]["name"], "Jordanelle");
    }
}
