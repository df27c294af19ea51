//! Raw JSON-lines records as they appear in the data files.

use crate::error::EtlError;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One song observation from the song dataset.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub artist_name: String,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
    pub year: i32,
    pub duration: f64,
}

/// One user-activity event from the log dataset.
///
/// Decoded for `NextSong` events only; the log extractor checks which of the
/// optional fields a play requires.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub page: String,
    pub ts: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_user_id")]
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
    pub song: Option<String>,
    pub artist: Option<String>,
    pub length: Option<f64>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// Event logs carry user ids either as strings ("10") or as numbers, and
/// logged-out events carry an empty string.
fn deserialize_user_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawUserId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    // 2^63 is exactly representable; every f64 below it and at or above
    // -2^63 converts to i64 without saturating.
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    let raw: Option<RawUserId> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(RawUserId::Text(s)) if s.trim().is_empty() => None,
        Some(RawUserId::Text(s)) => Some(s),
        Some(RawUserId::Integer(n)) => Some(n.to_string()),
        Some(RawUserId::Float(f)) if f.fract() == 0.0 => {
            if !(-I64_BOUND..I64_BOUND).contains(&f) {
                return Err(de::Error::custom(format!("userId {} is out of range", f)));
            }
            Some((f as i64).to_string())
        }
        Some(RawUserId::Float(f)) => Some(f.to_string()),
    })
}

/// Reads a JSON-lines file, returning each record with its 1-based line
/// number. Blank lines are skipped.
pub fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<(usize, T)>, EtlError> {
    let file = File::open(path).map_err(|e| EtlError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| EtlError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str::<T>(&line)
            .map_err(|e| EtlError::malformed(path, line_number, e.to_string()))?;
        records.push((line_number, record));
    }
    Ok(records)
}
