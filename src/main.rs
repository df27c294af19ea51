use anyhow::{Context, Result};
use clap::Parser;
use sparkify_etl::{CliConfig, EtlSettings, FileConfig, Loader};
use std::path::PathBuf;
use tracing::{error, info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "sparkify-etl")]
#[command(about = "Load song and event log data into the Sparkify warehouse")]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite warehouse database file.
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// Root directory of the song dataset.
    #[clap(long, value_parser = parse_path)]
    pub song_data: Option<PathBuf>,

    /// Root directory of the event log dataset.
    #[clap(long, value_parser = parse_path)]
    pub log_data: Option<PathBuf>,

    /// File name pattern of the data files (default: *.json).
    #[clap(long)]
    pub file_pattern: Option<String>,

    /// Skip files that fail to load instead of aborting the run.
    #[clap(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// How long to wait on a locked database, in milliseconds.
    #[clap(long)]
    pub busy_timeout_ms: Option<u64>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db_path.clone(),
            song_data: self.song_data.clone(),
            log_data: self.log_data.clone(),
            file_pattern: self.file_pattern.clone(),
            continue_on_error: self.continue_on_error,
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }
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

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let settings = EtlSettings::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Sparkify ETL");
    info!("============");
    info!("Warehouse database: {}", settings.db_path.display());
    info!("Song data: {}", settings.song_data.display());
    info!("Log data: {}", settings.log_data.display());

    match Loader::run(&settings) {
        Ok(summary) => {
            let failed = summary.songs.files_failed + summary.logs.files_failed;
            if failed > 0 {
                warn!("ETL completed with {} failed files", failed);
            } else {
                info!("ETL completed successfully!");
            }
            Ok(())
        }
        Err(e) => {
            error!("ETL run aborted: {:#}", e);
            Err(e)
        }
    }
}
