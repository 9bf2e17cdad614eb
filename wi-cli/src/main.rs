//! Well inventory CLI - manage groundwater wells and their hydrographs.

use clap::Parser;
use std::path::PathBuf;
use wi_cmd::config::{DATABASE_ENV, DEFAULT_DATABASE};

#[derive(Parser)]
#[command(
    name = "well-inventory",
    version,
    about = "Groundwater well inventory for local water managers"
)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = DATABASE_ENV, default_value = DEFAULT_DATABASE)]
    database: PathBuf,

    #[command(subcommand)]
    command: wi_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using database {}", cli.database.display());
    wi_cmd::run(&cli.database, cli.command)
}
