use super::records::{read_json_lines, LogRecord};
use crate::error::EtlError;
use crate::warehouse::{RowBatch, SongLookup, SongPlay, TimeEntry, User};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Page value of the events that represent a song being played.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// Extract time, user and songplay rows from one event log file.
///
/// Only `NextSong` events produce rows. Other events are only checked for a
/// `page`; a malformed `NextSong` event fails the whole file.
pub fn extract_log_file(path: &Path, lookup: &dyn SongLookup) -> Result<RowBatch, EtlError> {
    let events = read_json_lines::<Value>(path)?;
    let total = events.len();

    let mut batch = RowBatch::default();
    for (line, event) in events {
        let page = event
            .get("page")
            .and_then(Value::as_str)
            .ok_or_else(|| EtlError::malformed(path, line, "missing field `page`"))?;
        if page != NEXT_SONG_PAGE {
            continue;
        }
        let record: LogRecord = serde_json::from_value(event)
            .map_err(|e| EtlError::malformed(path, line, e.to_string()))?;
        let play = PlayEvent::from_record(record, path, line)?;
        let song_match = lookup.find_song(&play.song, &play.artist, play.length)?;

        batch.time_entries.push(play.time.clone());
        batch.users.push(User {
            user_id: play.user_id.clone(),
            first_name: play.first_name,
            last_name: play.last_name,
            gender: play.gender,
            level: play.level.clone(),
        });
        let (song_id, artist_id) = match song_match {
            Some(m) => (Some(m.song_id), Some(m.artist_id)),
            None => (None, None),
        };
        batch.songplays.push(SongPlay {
            start_time: play.time.start_time,
            user_id: play.user_id,
            level: play.level,
            song_id,
            artist_id,
            session_id: play.session_id,
            location: play.location,
            user_agent: play.user_agent,
        });
    }

    debug!(
        "{:?}: {} of {} events are song plays",
        path,
        batch.songplays.len(),
        total
    );
    Ok(batch)
}

/// A `NextSong` event with every required field present.
struct PlayEvent {
    time: TimeEntry,
    user_id: String,
    first_name: String,
    last_name: String,
    gender: String,
    level: String,
    song: String,
    artist: String,
    length: f64,
    session_id: i64,
    location: Option<String>,
    user_agent: Option<String>,
}

impl PlayEvent {
    fn from_record(record: LogRecord, path: &Path, line: usize) -> Result<Self, EtlError> {
        let required =
            |field: &str| EtlError::malformed(path, line, format!("missing field `{}`", field));

        let ts = record.ts.ok_or_else(|| required("ts"))?;
        let time = TimeEntry::from_millis(ts).ok_or_else(|| {
            EtlError::malformed(path, line, format!("timestamp {} is out of range", ts))
        })?;

        Ok(PlayEvent {
            time,
            user_id: record.user_id.ok_or_else(|| required("userId"))?,
            first_name: record.first_name.ok_or_else(|| required("firstName"))?,
            last_name: record.last_name.ok_or_else(|| required("lastName"))?,
            gender: record.gender.ok_or_else(|| required("gender"))?,
            level: record.level.ok_or_else(|| required("level"))?,
            song: record.song.ok_or_else(|| required("song"))?,
            artist: record.artist.ok_or_else(|| required("artist"))?,
            length: record.length.ok_or_else(|| required("length"))?,
            session_id: record.session_id.ok_or_else(|| required("sessionId"))?,
            location: record.location,
            user_agent: record.user_agent,
        })
    }
}
