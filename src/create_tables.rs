//! Schema setup tool
//!
//! Creates the warehouse star schema in a SQLite database, dropping the
//! existing warehouse tables first unless told otherwise. Run it once before
//! the first sparkify-etl run.

use anyhow::Result;
use clap::Parser;
use sparkify_etl::config::DEFAULT_DB_PATH;
use sparkify_etl::warehouse::{SqliteWarehouse, WarehouseStore, TABLE_NAMES};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "create-tables")]
#[command(about = "Create the warehouse tables in a SQLite database")]
struct Args {
    /// Path to the SQLite warehouse database
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db_path: PathBuf,

    /// Keep existing warehouse tables and their rows
    #[arg(long, default_value_t = false)]
    keep_existing: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Warehouse database: {}", args.db_path.display());
    if args.db_path.exists() && !args.keep_existing {
        warn!("Dropping existing tables: {}", TABLE_NAMES.join(", "));
    }

    let store = SqliteWarehouse::create(&args.db_path, !args.keep_existing)?;
    let counts = store.table_counts()?;
    info!(
        "Tables ready: {} artists, {} songs, {} time rows, {} users, {} songplays",
        counts.artists, counts.songs, counts.time, counts.users, counts.songplays
    );

    Ok(())
}
