use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, params};

use crate::{
    error::PipelineError,
    types::{Artist, Track},
};

/// SQLite-backed analytics store for collected tracks.
///
/// One table keyed by `(artist_id, track_id)`; writes use
/// `INSERT OR REPLACE`, so re-ingesting an artist overwrites prior rows
/// instead of duplicating them. The store is best-effort secondary storage
/// - the partitioned artifact files remain the primary record.
pub struct TrackStore {
    conn: Connection,
}

impl TrackStore {
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS tracks (
                artist_id TEXT,
                artist_name TEXT,
                genre TEXT,
                track_id TEXT,
                track_name TEXT,
                popularity INTEGER,
                preview_url TEXT,
                duration_ms INTEGER,
                collected_at TEXT,
                PRIMARY KEY (artist_id, track_id)
            )",
            [],
        )?;

        Ok(Self { conn })
    }

    /// Upserts all tracks of one artist for the given genre. Returns the
    /// number of rows written.
    pub fn upsert_artist_tracks(
        &self,
        artist: &Artist,
        tracks: &[Track],
        genre: &str,
    ) -> Result<usize, PipelineError> {
        let collected_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let mut stmt = self.conn.prepare(
            "INSERT OR REPLACE INTO tracks
                (artist_id, artist_name, genre, track_id, track_name,
                 popularity, preview_url, duration_ms, collected_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;

        let mut rows = 0usize;
        for track in tracks {
            stmt.execute(params![
                artist.id,
                artist.name,
                genre,
                track.id,
                track.name,
                track.popularity,
                track.preview_url,
                track.duration_ms.map(|d| d as i64),
                collected_at,
            ])?;
            rows += 1;
        }

        Ok(rows)
    }

    pub fn count_tracks(&self) -> Result<i64, PipelineError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM tracks", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_tracks_for_genre(&self, genre: &str) -> Result<i64, PipelineError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM tracks WHERE genre = ?1",
            params![genre],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
