//! Record extractors: turn one data file into the rows it contributes.
//!
//! Two datasets are supported:
//! 1. Song data: one song/artist observation per file
//! 2. Log data: user-activity events, of which only `NextSong` plays matter

mod log;
mod records;
mod song;

pub use log::{extract_log_file, NEXT_SONG_PAGE};
pub use records::{read_json_lines, LogRecord, SongRecord};
pub use song::extract_song_file;

use crate::error::EtlError;
use crate::warehouse::{RowBatch, SongLookup};
use std::fmt;
use std::path::Path;

/// The dataset a file belongs to, which selects its extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Songs,
    Logs,
}

impl Dataset {
    /// Extract the rows of `path`. Log extraction resolves song plays
    /// through `lookup`.
    pub fn extract(&self, path: &Path, lookup: &dyn SongLookup) -> Result<RowBatch, EtlError> {
        match self {
            Dataset::Songs => extract_song_file(path),
            Dataset::Logs => extract_log_file(path, lookup),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Songs => write!(f, "song data"),
            Dataset::Logs => write!(f, "log data"),
        }
    }
}
