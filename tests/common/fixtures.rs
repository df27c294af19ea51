//! Temporary song/log datasets for end-to-end tests

use super::constants::*;
use anyhow::Result;
use rusqlite::Connection;
use serde_json::{json, Value};
use sparkify_etl::config::StoreSettings;
use sparkify_etl::{EtlSettings, FilePattern, Loader, RunSummary};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A song dataset record as found in the song data files.
pub fn song_record(
    song_id: &str,
    title: &str,
    artist_id: &str,
    artist_name: &str,
    duration: f64,
) -> Value {
    json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": 0
    })
}

/// A `NextSong` event as found in the log data files.
#[allow(clippy::too_many_arguments)]
pub fn log_event(
    ts: i64,
    user_id: &str,
    first_name: &str,
    last_name: &str,
    level: &str,
    song: &str,
    artist: &str,
    length: f64,
) -> Value {
    json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": first_name,
        "gender": "F",
        "itemInSession": 0,
        "lastName": last_name,
        "length": length,
        "level": level,
        "location": "Bakersfield, CA",
        "method": "PUT",
        "page": "NextSong",
        "registration": 1540266185796.0,
        "sessionId": 139,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0 (X11; Linux x86_64; rv:31.0) Gecko/20100101 Firefox/31.0",
        "userId": user_id
    })
}

fn home_event(ts: i64, user_id: &str) -> Value {
    json!({
        "artist": null,
        "auth": "Logged In",
        "firstName": USER_1_FIRST_NAME,
        "gender": "F",
        "itemInSession": 1,
        "lastName": USER_1_LAST_NAME,
        "length": null,
        "level": "free",
        "location": "Bakersfield, CA",
        "method": "GET",
        "page": "Home",
        "registration": 1540266185796.0,
        "sessionId": 139,
        "song": null,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0",
        "userId": user_id
    })
}

/// A dataset laid out like the real one: `song_data/` and `log_data/` under a
/// temporary directory, with the warehouse database next to them.
pub struct TestDataset {
    pub dir: TempDir,
    pub continue_on_error: bool,
}

impl TestDataset {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("song_data")).expect("Failed to create song_data");
        fs::create_dir_all(dir.path().join("log_data")).expect("Failed to create log_data");
        TestDataset {
            dir,
            continue_on_error: false,
        }
    }

    pub fn song_data(&self) -> PathBuf {
        self.dir.path().join("song_data")
    }

    pub fn log_data(&self) -> PathBuf {
        self.dir.path().join("log_data")
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("sparkify.db")
    }

    pub fn continue_on_error(mut self) -> Self {
        self.continue_on_error = true;
        self
    }

    /// Writes `content` at `relative` under the dataset root.
    pub fn write_raw(self, relative: &str, content: &str) -> Self {
        write_file(&self.dir.path().join(relative), content);
        self
    }

    pub fn write_song_file(self, relative: &str, record: &Value) -> Self {
        let path = self.song_data().join(relative);
        write_file(&path, &record.to_string());
        self
    }

    pub fn write_log_file(self, relative: &str, events: &[Value]) -> Self {
        let path = self.log_data().join(relative);
        let lines: Vec<String> = events.iter().map(|e| e.to_string()).collect();
        write_file(&path, &(lines.join("\n") + "\n"));
        self
    }

    /// Two songs by two artists, in nested directories.
    pub fn with_catalog(self) -> Self {
        self.write_song_file(
            &format!("A/A/A/{}.json", SONG_1_ID),
            &song_record(
                SONG_1_ID,
                SONG_1_TITLE,
                ARTIST_1_ID,
                ARTIST_1_NAME,
                SONG_1_DURATION,
            ),
        )
        .write_song_file(
            &format!("A/B/C/{}.json", SONG_2_ID),
            &json!({
                "num_songs": 1,
                "artist_id": ARTIST_2_ID,
                "artist_latitude": ARTIST_2_LATITUDE,
                "artist_longitude": ARTIST_2_LONGITUDE,
                "artist_location": ARTIST_2_LOCATION,
                "artist_name": ARTIST_2_NAME,
                "song_id": SONG_2_ID,
                "title": SONG_2_TITLE,
                "duration": SONG_2_DURATION,
                "year": SONG_2_YEAR
            }),
        )
    }

    /// One log file: a play of song 1 by user 1, a non-play event, and a play
    /// of a song missing from the catalog by user 2.
    pub fn with_play_log(self) -> Self {
        self.write_log_file(
            "2018/11/2018-11-02-events.json",
            &[
                log_event(
                    TS_1,
                    USER_1_ID,
                    USER_1_FIRST_NAME,
                    USER_1_LAST_NAME,
                    "free",
                    SONG_1_TITLE,
                    ARTIST_1_NAME,
                    SONG_1_DURATION,
                ),
                home_event(TS_1 + 1000, USER_1_ID),
                log_event(
                    TS_2,
                    USER_2_ID,
                    USER_2_FIRST_NAME,
                    USER_2_LAST_NAME,
                    "paid",
                    "Not In The Catalog",
                    "Nobody",
                    100.0,
                ),
            ],
        )
    }

    pub fn settings(&self) -> EtlSettings {
        EtlSettings {
            db_path: self.db_path(),
            song_data: self.song_data(),
            log_data: self.log_data(),
            file_pattern: FilePattern::new("*.json").expect("Invalid pattern"),
            continue_on_error: self.continue_on_error,
            store: StoreSettings::default(),
        }
    }

    pub fn run(&self) -> Result<RunSummary> {
        Loader::run(&self.settings())
    }

    /// Opens the warehouse database for inspection.
    pub fn connection(&self) -> Connection {
        Connection::open(self.db_path()).expect("Failed to open warehouse database")
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directories");
    }
    fs::write(path, content).expect("Failed to write fixture file");
}
