//! Row types for the warehouse tables.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Format used for `start_time` columns.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Clone, Debug, PartialEq)]
pub struct Song {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Artist {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Calendar decomposition of a play's start time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeEntry {
    pub start_time: DateTime<Utc>,
    pub hour: u32,
    pub day: u32,
    /// ISO 8601 week number.
    pub week: u32,
    pub month: u32,
    pub year: i32,
    /// Monday = 0 ... Sunday = 6.
    pub weekday: u32,
}

impl TimeEntry {
    pub fn from_start_time(start_time: DateTime<Utc>) -> Self {
        TimeEntry {
            start_time,
            hour: start_time.hour(),
            day: start_time.day(),
            week: start_time.iso_week().week(),
            month: start_time.month(),
            year: start_time.year(),
            weekday: start_time.weekday().num_days_from_monday(),
        }
    }

    /// Builds an entry from a millisecond Unix timestamp, `None` if out of range.
    pub fn from_millis(ts: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(ts).map(Self::from_start_time)
    }

    pub fn start_time_str(&self) -> String {
        format_start_time(&self.start_time)
    }
}

pub fn format_start_time(start_time: &DateTime<Utc>) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub level: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SongPlay {
    pub start_time: DateTime<Utc>,
    pub user_id: String,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// Song and artist ids matched for a play event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}

/// Rows contributed by a single data file, applied in field order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowBatch {
    pub songs: Vec<Song>,
    pub artists: Vec<Artist>,
    pub time_entries: Vec<TimeEntry>,
    pub users: Vec<User>,
    pub songplays: Vec<SongPlay>,
}

impl RowBatch {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.songs.len()
            + self.artists.len()
            + self.time_entries.len()
            + self.users.len()
            + self.songplays.len()
    }
}

/// Row counts, either applied by a run or present in the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub songs: usize,
    pub artists: usize,
    pub time: usize,
    pub users: usize,
    pub songplays: usize,
}

impl TableCounts {
    pub fn add(&mut self, batch: &RowBatch) {
        self.songs += batch.songs.len();
        self.artists += batch.artists.len();
        self.time += batch.time_entries.len();
        self.users += batch.users.len();
        self.songplays += batch.songplays.len();
    }

    pub fn merge(&mut self, other: &TableCounts) {
        self.songs += other.songs;
        self.artists += other.artists;
        self.time += other.time;
        self.users += other.users;
        self.songplays += other.songplays;
    }
}
