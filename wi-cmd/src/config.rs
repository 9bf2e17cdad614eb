//! Database location and connection setup.

use anyhow::Context;
use std::path::Path;
use wi_db::Database;

/// Database file used when neither `--database` nor `WELL_INVENTORY_DB` is set.
pub const DEFAULT_DATABASE: &str = "well_inventory.sqlite";

/// Environment variable naming the database file.
pub const DATABASE_ENV: &str = "WELL_INVENTORY_DB";

/// Create the parent directory of the database file if it is missing.
pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Open the store for one command. Dropping it closes the connection.
pub fn open_database(db_path: &Path) -> anyhow::Result<Database> {
    ensure_db_dir(db_path)?;
    Database::open(db_path).with_context(|| format!("opening database {}", db_path.display()))
}
