//! SQLite-backed warehouse store.
//!
//! Every file's rows are applied inside a single transaction, so a file is
//! either fully loaded or not at all. Songs, artists and time entries are
//! insert-or-ignore on their key; users are upserted (last write wins).

use super::models::{format_start_time, RowBatch, SongMatch, TableCounts};
use super::schema::WAREHOUSE_VERSIONED_SCHEMAS;
use crate::config::StoreSettings;
use crate::error::EtlError;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{bail, Context};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const INSERT_SONG_SQL: &str = "INSERT INTO songs (song_id, title, artist_id, year, duration) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(song_id) DO NOTHING";

const INSERT_ARTIST_SQL: &str =
    "INSERT INTO artists (artist_id, name, location, latitude, longitude) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(artist_id) DO NOTHING";

const INSERT_TIME_SQL: &str =
    "INSERT INTO time (start_time, hour, day, week, month, year, weekday) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) ON CONFLICT(start_time) DO NOTHING";

const UPSERT_USER_SQL: &str =
    "INSERT INTO users (user_id, first_name, last_name, gender, level) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT(user_id) DO UPDATE SET \
         first_name = excluded.first_name, \
         last_name = excluded.last_name, \
         gender = excluded.gender, \
         level = excluded.level";

const INSERT_SONGPLAY_SQL: &str = "INSERT INTO songplays \
     (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SELECT_SONG_SQL: &str = "SELECT s.song_id, a.artist_id FROM songs s \
     JOIN artists a ON s.artist_id = a.artist_id \
     WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3 \
     LIMIT 1";

/// Resolves play events to catalog entries.
pub trait SongLookup {
    /// Find the song whose title, artist name and duration all match exactly.
    fn find_song(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>, EtlError>;
}

/// Storage operations used by the loader.
pub trait WarehouseStore: SongLookup {
    /// Apply every row of `batch` and commit them as one unit.
    fn apply_batch(&mut self, batch: &RowBatch) -> Result<(), EtlError>;

    /// Current number of rows in each table.
    fn get_counts(&self) -> Result<TableCounts, EtlError>;
}

pub struct SqliteWarehouseStore {
    conn: Connection,
}

fn bootstrap_schema(conn: &Connection) -> anyhow::Result<()> {
    let latest_version = WAREHOUSE_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &WAREHOUSE_VERSIONED_SCHEMAS[latest_version];

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!("Creating warehouse schema at version {}", latest_version);
        latest_schema.create(conn)?;
        return Ok(());
    }

    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    let expected_version = (BASE_DB_VERSION + latest_version) as i64;
    if db_version != expected_version {
        bail!(
            "Database is not a warehouse at schema version {} (user_version is {})",
            latest_version,
            db_version
        );
    }

    latest_schema.validate(conn)?;
    Ok(())
}

impl SqliteWarehouseStore {
    /// Open (creating if needed) the warehouse database at `path`.
    pub fn open(path: &Path, settings: &StoreSettings) -> Result<Self, EtlError> {
        let connectivity = |source: anyhow::Error| EtlError::Connectivity {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open(path)
            .context("Failed to open warehouse database")
            .map_err(connectivity)?;
        conn.busy_timeout(Duration::from_millis(settings.busy_timeout_ms))
            .context("Failed to set busy timeout")
            .map_err(connectivity)?;
        bootstrap_schema(&conn).map_err(connectivity)?;

        let store = SqliteWarehouseStore { conn };
        let counts = store.get_counts()?;
        info!(
            "Opened warehouse at {:?}: {} songs, {} artists, {} time entries, {} users, {} songplays",
            path, counts.songs, counts.artists, counts.time, counts.users, counts.songplays
        );
        Ok(store)
    }

    /// Create an in-memory database (for testing).
    #[cfg(test)]
    pub fn in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        bootstrap_schema(&conn)?;
        Ok(SqliteWarehouseStore { conn })
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    fn count(&self, table: &'static str) -> Result<usize, EtlError> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                r.get(0)
            })
            .map_err(EtlError::store(table))?;
        Ok(count as usize)
    }

    fn insert_rows(tx: &Transaction, batch: &RowBatch) -> Result<(), EtlError> {
        let mut stmt = tx
            .prepare_cached(INSERT_SONG_SQL)
            .map_err(EtlError::store("songs"))?;
        for song in &batch.songs {
            stmt.execute(params![
                &song.song_id,
                &song.title,
                &song.artist_id,
                song.year,
                song.duration
            ])
            .map_err(EtlError::store("songs"))?;
        }

        let mut stmt = tx
            .prepare_cached(INSERT_ARTIST_SQL)
            .map_err(EtlError::store("artists"))?;
        for artist in &batch.artists {
            stmt.execute(params![
                &artist.artist_id,
                &artist.name,
                &artist.location,
                artist.latitude,
                artist.longitude
            ])
            .map_err(EtlError::store("artists"))?;
        }

        let mut stmt = tx
            .prepare_cached(INSERT_TIME_SQL)
            .map_err(EtlError::store("time"))?;
        for entry in &batch.time_entries {
            stmt.execute(params![
                entry.start_time_str(),
                entry.hour,
                entry.day,
                entry.week,
                entry.month,
                entry.year,
                entry.weekday
            ])
            .map_err(EtlError::store("time"))?;
        }

        let mut stmt = tx
            .prepare_cached(UPSERT_USER_SQL)
            .map_err(EtlError::store("users"))?;
        for user in &batch.users {
            stmt.execute(params![
                &user.user_id,
                &user.first_name,
                &user.last_name,
                &user.gender,
                &user.level
            ])
            .map_err(EtlError::store("users"))?;
        }

        let mut stmt = tx
            .prepare_cached(INSERT_SONGPLAY_SQL)
            .map_err(EtlError::store("songplays"))?;
        for play in &batch.songplays {
            stmt.execute(params![
                format_start_time(&play.start_time),
                &play.user_id,
                &play.level,
                &play.song_id,
                &play.artist_id,
                play.session_id,
                &play.location,
                &play.user_agent
            ])
            .map_err(EtlError::store("songplays"))?;
        }
        Ok(())
    }
}

impl SongLookup for SqliteWarehouseStore {
    fn find_song(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>, EtlError> {
        let mut stmt = self
            .conn
            .prepare_cached(SELECT_SONG_SQL)
            .map_err(EtlError::store("songs"))?;
        stmt.query_row(params![title, artist_name, duration], |row| {
            Ok(SongMatch {
                song_id: row.get(0)?,
                artist_id: row.get(1)?,
            })
        })
        .optional()
        .map_err(EtlError::store("songs"))
    }
}

impl WarehouseStore for SqliteWarehouseStore {
    fn apply_batch(&mut self, batch: &RowBatch) -> Result<(), EtlError> {
        let tx = self
            .conn
            .transaction()
            .map_err(EtlError::store("transaction"))?;
        // Dropping `tx` on error rolls the whole file back.
        Self::insert_rows(&tx, batch)?;
        tx.commit().map_err(EtlError::store("transaction"))?;
        debug!("Committed {} rows", batch.len());
        Ok(())
    }

    fn get_counts(&self) -> Result<TableCounts, EtlError> {
        Ok(TableCounts {
            songs: self.count("songs")?,
            artists: self.count("artists")?,
            time: self.count("time")?,
            users: self.count("users")?,
            songplays: self.count("songplays")?,
        })
    }
}
