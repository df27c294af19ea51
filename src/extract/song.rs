use super::records::{read_json_lines, SongRecord};
use crate::error::EtlError;
use crate::warehouse::{Artist, RowBatch, Song};
use std::path::Path;
use tracing::warn;

/// Extract the song and artist rows from one song data file.
///
/// Song files hold a single observation; any further records are ignored.
pub fn extract_song_file(path: &Path) -> Result<RowBatch, EtlError> {
    let mut records = read_json_lines::<SongRecord>(path)?.into_iter();
    let (_, record) = records
        .next()
        .ok_or_else(|| EtlError::malformed(path, 0, "file contains no song record"))?;

    let extra = records.count();
    if extra > 0 {
        warn!("Ignoring {} extra records in song file {:?}", extra, path);
    }

    Ok(song_rows(record))
}

fn song_rows(record: SongRecord) -> RowBatch {
    let song = Song {
        song_id: record.song_id,
        title: record.title,
        artist_id: record.artist_id.clone(),
        year: record.year,
        duration: record.duration,
    };
    let artist = Artist {
        artist_id: record.artist_id,
        name: record.artist_name,
        location: record.artist_location,
        latitude: record.artist_latitude,
        longitude: record.artist_longitude,
    };
    RowBatch {
        songs: vec![song],
        artists: vec![artist],
        ..Default::default()
    }
}
