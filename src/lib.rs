//! Sparkify ETL Library
//!
//! Loads song metadata and user-activity logs into a star-schema SQLite
//! warehouse. This library exposes the internal modules for testing and reuse.

pub mod config;
pub mod error;
pub mod extract;
pub mod loader;
pub mod locator;
pub mod sqlite_persistence;
pub mod warehouse;

// Re-export commonly used types for convenience
pub use config::{CliConfig, EtlSettings, FileConfig};
pub use error::EtlError;
pub use extract::Dataset;
pub use loader::{LoadStats, Loader, RunSummary};
pub use locator::{locate_files, FilePattern};
pub use warehouse::{SongLookup, SqliteWarehouseStore, TableCounts, WarehouseStore};
