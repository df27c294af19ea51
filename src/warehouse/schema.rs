//! Star schema for the song play warehouse.
//!
//! `songplays` is the fact table; songs, artists, time and users are the
//! dimensions. No foreign keys are declared: play events routinely reference
//! songs that are not in the catalog.

use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        crate::sqlite_column!("song_id", &SqlType::Text, is_primary_key = true),
        crate::sqlite_column!("title", &SqlType::Text, non_null = true),
        crate::sqlite_column!("artist_id", &SqlType::Text, non_null = true),
        crate::sqlite_column!("year", &SqlType::Integer, non_null = true),
        crate::sqlite_column!("duration", &SqlType::Real, non_null = true),
    ],
    indices: &[("idx_songs_title", "title")],
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        crate::sqlite_column!("artist_id", &SqlType::Text, is_primary_key = true),
        crate::sqlite_column!("name", &SqlType::Text, non_null = true),
        crate::sqlite_column!("location", &SqlType::Text),
        crate::sqlite_column!("latitude", &SqlType::Real),
        crate::sqlite_column!("longitude", &SqlType::Real),
    ],
    indices: &[("idx_artists_name", "name")],
};

const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        crate::sqlite_column!("start_time", &SqlType::Text, is_primary_key = true), // 'YYYY-MM-DD HH:MM:SS.mmm' UTC
        crate::sqlite_column!("hour", &SqlType::Integer, non_null = true),
        crate::sqlite_column!("day", &SqlType::Integer, non_null = true),
        crate::sqlite_column!("week", &SqlType::Integer, non_null = true),
        crate::sqlite_column!("month", &SqlType::Integer, non_null = true),
        crate::sqlite_column!("year", &SqlType::Integer, non_null = true),
        crate::sqlite_column!("weekday", &SqlType::Integer, non_null = true), // 0=Monday
    ],
    indices: &[],
};

const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        crate::sqlite_column!("user_id", &SqlType::Text, is_primary_key = true),
        crate::sqlite_column!("first_name", &SqlType::Text, non_null = true),
        crate::sqlite_column!("last_name", &SqlType::Text, non_null = true),
        crate::sqlite_column!("gender", &SqlType::Text, non_null = true),
        crate::sqlite_column!("level", &SqlType::Text, non_null = true), // 'free', 'paid'
    ],
    indices: &[],
};

const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        crate::sqlite_column!("songplay_id", &SqlType::Integer, is_primary_key = true),
        crate::sqlite_column!("start_time", &SqlType::Text, non_null = true),
        crate::sqlite_column!("user_id", &SqlType::Text, non_null = true),
        crate::sqlite_column!("level", &SqlType::Text, non_null = true),
        crate::sqlite_column!("song_id", &SqlType::Text),
        crate::sqlite_column!("artist_id", &SqlType::Text),
        crate::sqlite_column!("session_id", &SqlType::Integer, non_null = true),
        crate::sqlite_column!("location", &SqlType::Text),
        crate::sqlite_column!("user_agent", &SqlType::Text),
    ],
    indices: &[
        ("idx_songplays_start_time", "start_time"),
        ("idx_songplays_user", "user_id"),
    ],
};

pub const WAREHOUSE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        SONGS_TABLE,
        ARTISTS_TABLE,
        TIME_TABLE,
        USERS_TABLE,
        SONGPLAYS_TABLE,
    ],
}];
