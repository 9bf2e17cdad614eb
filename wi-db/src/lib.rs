//! SQLite store for the groundwater well inventory.
//!
//! A [`Database`] owns a single `rusqlite` connection. Callers open one per
//! unit of work, pass it by reference into each operation and drop it when
//! done, which closes the connection.
//!
//! # Usage
//!
//! ```rust
//! use wi_core::well::WellForm;
//! use wi_db::Database;
//!
//! let mut db = Database::open_in_memory().unwrap();
//! let well = db
//!     .register_well(&WellForm {
//!         name: "Deer Creek".into(),
//!         owner: "Reclamation".into(),
//!         river: "Provo River".into(),
//!         date_built: "1941".into(),
//!         location: r#"{"geometries":[{"type":"Point","coordinates":[-111.5,40.4]}]}"#.into(),
//!     })
//!     .unwrap();
//!
//! let report = db.ingest_hydrograph(well.id, b"0,12.5\n1,13.0\n").unwrap();
//! assert_eq!(report.points_loaded, 2);
//! assert_eq!(db.query_hydrograph_id(well.id).unwrap(), Some(report.hydrograph_id));
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`].
//!
//! - `wells` - Well metadata and location
//! - `hydrographs` - At most one per well, linked by `well_id`
//! - `hydrograph_points` - (time, flow) rows owned by a hydrograph
//!
//! # Concurrency
//!
//! Nothing here locks across connections. Two simultaneous ingestions for
//! the same well both succeed and the last commit wins.

pub mod schema;
pub mod models;
mod ingest;
mod queries;
mod wells;

pub use ingest::{IngestError, IngestReport};
pub use wells::{example_wells, RegisterError};

use rusqlite::Connection;
use std::path::Path;

/// `PRAGMA user_version` of an initialized store.
pub const SCHEMA_VERSION: i64 = 1;

/// A well inventory store backed by one SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database file and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        log::debug!("db: opened {}", path.as_ref().display());
        Self::from_connection(conn)
    }

    /// Create a new in-memory database with the schema applied.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self { conn })
    }

    /// Mark the store as initialized, seeding it on the first call.
    ///
    /// The first call on a fresh store inserts [`example_wells`] when `seed`
    /// is set. A store that already holds wells counts as initialized and is
    /// only marked. Later calls do nothing. Returns whether this was the
    /// first initialization.
    pub fn initialize(&mut self, seed: bool) -> anyhow::Result<bool> {
        let version: i64 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if version >= SCHEMA_VERSION {
            log::info!("db: already initialized (version {})", version);
            return Ok(false);
        }

        let tx = self.conn.transaction()?;
        let has_wells: bool =
            tx.query_row("SELECT EXISTS(SELECT 1 FROM wells)", [], |row| row.get(0))?;
        if has_wells {
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            log::info!("db: store already holds wells, marked as initialized");
            return Ok(false);
        }

        if seed {
            let examples = example_wells();
            for well in &examples {
                wells::insert_well(&tx, well)?;
            }
            log::info!("db: seeded {} example wells", examples.len());
        }
        tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tx.commit()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::open_in_memory();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::open_in_memory().unwrap();
        let wells = db.query_wells().unwrap();
        assert!(wells.is_empty(), "New database should have no wells");
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let db = Database::open_in_memory().unwrap();
        let result = db.conn.execute(
            "INSERT INTO hydrograph_points (hydrograph_id, time, flow) VALUES (42, 0, 1.0)",
            [],
        );
        assert!(result.is_err(), "Orphan points should be rejected");
    }

    #[test]
    fn initialize_seeds_only_the_first_time() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(db.initialize(true).unwrap());
        assert_eq!(db.query_wells().unwrap().len(), 2);

        assert!(!db.initialize(true).unwrap());
        assert_eq!(db.query_wells().unwrap().len(), 2, "Should not seed twice");
    }

    #[test]
    fn initialize_without_seed_leaves_store_empty() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(db.initialize(false).unwrap());
        assert!(db.query_wells().unwrap().is_empty());
        assert!(!db.initialize(true).unwrap());
        assert!(db.query_wells().unwrap().is_empty());
    }

    #[test]
    fn initialize_does_not_seed_a_store_in_use() {
        let mut db = Database::open_in_memory().unwrap();
        let mine = wells::example_wells().remove(0);
        let mine = wi_core::well::NewWell {
            name: "Mill Hollow".to_string(),
            ..mine
        };
        db.add_well(&mine).unwrap();

        assert!(!db.initialize(true).unwrap());
        let names: Vec<String> = db
            .query_wells()
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["Mill Hollow".to_string()]);

        let version: i64 = db
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION, "Store in use should be marked");
    }

    #[test]
    fn file_database_persists_between_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wells.sqlite");
        {
            let mut db = Database::open(&path).unwrap();
            db.initialize(true).unwrap();
        }
        let mut db = Database::open(&path).unwrap();
        assert_eq!(db.query_wells().unwrap().len(), 2);
        assert!(!db.initialize(true).unwrap(), "Version should persist");
    }
}
