mod file_config;

pub use file_config::{FileConfig, StoreConfig};

use crate::locator::FilePattern;
use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub const DEFAULT_SONG_DATA: &str = "data/song_data";
pub const DEFAULT_LOG_DATA: &str = "data/log_data";
pub const DEFAULT_FILE_PATTERN: &str = "*.json";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub song_data: Option<PathBuf>,
    pub log_data: Option<PathBuf>,
    pub file_pattern: Option<String>,
    pub continue_on_error: bool,
    pub busy_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct EtlSettings {
    pub db_path: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    pub file_pattern: FilePattern,
    /// Log and skip files that fail instead of aborting the run.
    pub continue_on_error: bool,
    pub store: StoreSettings,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub busy_timeout_ms: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl EtlSettings {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| anyhow!("db_path must be specified via --db-path or in config file"))?;

        let song_data = file
            .song_data
            .map(PathBuf::from)
            .or_else(|| cli.song_data.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SONG_DATA));
        let log_data = file
            .log_data
            .map(PathBuf::from)
            .or_else(|| cli.log_data.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DATA));

        let pattern = file
            .file_pattern
            .or_else(|| cli.file_pattern.clone())
            .unwrap_or_else(|| DEFAULT_FILE_PATTERN.to_string());
        let file_pattern = FilePattern::new(&pattern)?;

        let continue_on_error = file.continue_on_error.unwrap_or(cli.continue_on_error);

        let store_file = file.store.unwrap_or_default();
        let store = StoreSettings {
            busy_timeout_ms: store_file
                .busy_timeout_ms
                .or(cli.busy_timeout_ms)
                .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS),
        };

        Ok(Self {
            db_path,
            song_data,
            log_data,
            file_pattern,
            continue_on_error,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_cli_only() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/tmp/warehouse.db")),
            song_data: Some(PathBuf::from("/data/songs")),
            log_data: Some(PathBuf::from("/data/logs")),
            file_pattern: Some("*.jsonl".to_string()),
            continue_on_error: true,
            busy_timeout_ms: Some(100),
        };

        let settings = EtlSettings::resolve(&cli, None).unwrap();

        assert_eq!(settings.db_path, PathBuf::from("/tmp/warehouse.db"));
        assert_eq!(settings.song_data, PathBuf::from("/data/songs"));
        assert_eq!(settings.log_data, PathBuf::from("/data/logs"));
        assert_eq!(settings.file_pattern.as_str(), "*.jsonl");
        assert!(settings.continue_on_error);
        assert_eq!(settings.store.busy_timeout_ms, 100);
    }

    #[test]
    fn test_resolve_defaults() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("warehouse.db")),
            ..Default::default()
        };

        let settings = EtlSettings::resolve(&cli, None).unwrap();

        assert_eq!(settings.song_data, PathBuf::from(DEFAULT_SONG_DATA));
        assert_eq!(settings.log_data, PathBuf::from(DEFAULT_LOG_DATA));
        assert_eq!(settings.file_pattern.as_str(), DEFAULT_FILE_PATTERN);
        assert!(!settings.continue_on_error);
        assert_eq!(settings.store.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/should/be/overridden.db")),
            song_data: Some(PathBuf::from("/cli/songs")),
            continue_on_error: true,
            ..Default::default()
        };

        let file_config = FileConfig {
            db_path: Some("/toml/warehouse.db".to_string()),
            log_data: Some("/toml/logs".to_string()),
            continue_on_error: Some(false),
            store: Some(StoreConfig {
                busy_timeout_ms: Some(42),
            }),
            ..Default::default()
        };

        let settings = EtlSettings::resolve(&cli, Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(settings.db_path, PathBuf::from("/toml/warehouse.db"));
        assert_eq!(settings.log_data, PathBuf::from("/toml/logs"));
        assert!(!settings.continue_on_error);
        assert_eq!(settings.store.busy_timeout_ms, 42);
        // CLI value used when TOML doesn't specify
        assert_eq!(settings.song_data, PathBuf::from("/cli/songs"));
    }

    #[test]
    fn test_resolve_missing_db_path_error() {
        let result = EtlSettings::resolve(&CliConfig::default(), None);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("db_path must be specified"));
    }

    #[test]
    fn test_resolve_invalid_pattern_error() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("warehouse.db")),
            file_pattern: Some("song_data/*.json".to_string()),
            ..Default::default()
        };
        let result = EtlSettings::resolve(&cli, None);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid file pattern"));
    }
}
