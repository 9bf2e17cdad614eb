//! SQL schema definitions for the well inventory store.
//!
//! The schema is applied as a single batch every time a database is opened.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `wells` - Well metadata (name, owner, river, date built) and location
///   in decimal degrees
/// - `hydrographs` - One row per well with a hydrograph; `well_id` is unique
///   so a well can own at most one
/// - `hydrograph_points` - Time (hours) and flow (cfs) rows of a hydrograph.
///   `time` is not unique and rows carry no order; readers sort by time.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS wells (
        id INTEGER PRIMARY KEY,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        name TEXT NOT NULL,
        owner TEXT NOT NULL,
        river TEXT NOT NULL,
        date_built TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS hydrographs (
        id INTEGER PRIMARY KEY,
        well_id INTEGER UNIQUE REFERENCES wells(id) ON DELETE SET NULL
    );

    CREATE TABLE IF NOT EXISTS hydrograph_points (
        id INTEGER PRIMARY KEY,
        hydrograph_id INTEGER NOT NULL REFERENCES hydrographs(id) ON DELETE CASCADE,
        time INTEGER NOT NULL,
        flow REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_points_hydrograph ON hydrograph_points(hydrograph_id);
    "#
}
