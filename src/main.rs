use anyhow::{Context, Result};
use clap::Parser;
use sparkify_etl::config::{
    AppConfig, CliConfig, FileConfig, DEFAULT_DB_PATH, DEFAULT_LOG_DATA, DEFAULT_SONG_DATA,
};
use sparkify_etl::warehouse::{SqliteWarehouse, WarehouseStore};
use std::path::PathBuf;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sparkify-etl", version)]
#[command(about = "Load song and log data into the warehouse")]
struct CliArgs {
    /// Path to the SQLite warehouse database (created by create-tables).
    #[clap(long, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Root directory of the song-data files.
    #[clap(long, default_value = DEFAULT_SONG_DATA)]
    pub song_data: PathBuf,

    /// Root directory of the log-data files.
    #[clap(long, default_value = DEFAULT_LOG_DATA)]
    pub log_data: PathBuf,

    /// Optional TOML file overriding the values above.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    info!(
        "sparkify-etl {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        db_path: cli_args.db_path,
        song_data: cli_args.song_data,
        log_data: cli_args.log_data,
    };
    let cwd = std::env::current_dir()
        .context("Failed to read working directory")?;
    let config = AppConfig::resolve(&cli_config, file_config, &cwd)?;

    let store = SqliteWarehouse::open(&config.db_path).map_err(|e| {
        error!("{}", e);
        e
    })?;

    let summary = sparkify_etl::run(&store, &config, &mut |_| {}).map_err(|e| {
        error!("{}", e);
        e
    })?;

    let counts = store.table_counts()?;
    info!(
        "Processed {} song files and {} log files",
        summary.songs.files_processed, summary.logs.files_processed
    );
    info!(
        "Warehouse contains {} artists, {} songs, {} time rows, {} users, {} songplays",
        counts.artists, counts.songs, counts.time, counts.users, counts.songplays
    );

    Ok(())
}
