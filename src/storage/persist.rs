use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Utc;
use serde::Serialize;

use crate::{
    error::PipelineError,
    info,
    management::Metrics,
    storage::TrackStore,
    types::{Artist, ProcessedTrack, Track},
    warning,
};

/// Writes raw and normalized collection artifacts and mirrors normalized
/// rows into the track store.
///
/// Artifacts land under date partitions recomputed per call in UTC, so
/// runs crossing midnight split cleanly:
///
/// ```text
/// <data>/raw/misc/YYYY/MM/DD/<label>_<ts>.json
/// <data>/processed/<genre>/YYYY/MM/DD/<artist>_<genre>.json
/// ```
pub struct Persister {
    raw_dir: PathBuf,
    processed_dir: PathBuf,
    store: Option<TrackStore>,
    metrics: Arc<Metrics>,
}

impl Persister {
    pub fn new(data_dir: &Path, store: Option<TrackStore>, metrics: Arc<Metrics>) -> Self {
        Self {
            raw_dir: data_dir.join("raw"),
            processed_dir: data_dir.join("processed"),
            store,
            metrics,
        }
    }

    /// Normalizes the artist's tracks, writes the processed artifact file
    /// (overwriting any previous file for the same artist, genre and day)
    /// and upserts the rows into the track store. A store failure is logged
    /// and ignored - the file is the primary record. Returns the processed
    /// file path.
    pub async fn persist(
        &self,
        artist: &Artist,
        tracks: &[Track],
        genre: &str,
    ) -> Result<PathBuf, PipelineError> {
        let artist_name = if artist.name.is_empty() {
            "unknown_artist"
        } else {
            artist.name.as_str()
        };

        let processed: Vec<ProcessedTrack> = tracks
            .iter()
            .map(|t| ProcessedTrack::normalize(artist_name, t))
            .collect();

        let dir = Self::partition_dir(&self.processed_dir, genre).await?;
        let path = dir.join(format!("{}_{}.json", file_stem(artist_name), genre));
        let json = serde_json::to_string_pretty(&processed)?;
        async_fs::write(&path, json).await?;
        info!(
            "Saved processed: {} ({} tracks)",
            path.display(),
            processed.len()
        );

        if let Some(store) = &self.store {
            if let Err(e) = store.upsert_artist_tracks(artist, tracks, genre) {
                warning!("Failed to write track store: {}", e);
            }
        }

        self.metrics.incr_artists_processed(1);
        self.metrics.incr_tracks_processed(processed.len() as u64);

        Ok(path)
    }

    /// Writes an unmodified upstream payload under the `misc` partition
    /// with a UTC timestamp suffix, for audit and replay.
    pub async fn persist_raw<T: Serialize>(
        &self,
        label: &str,
        value: &T,
    ) -> Result<PathBuf, PipelineError> {
        let ts = Utc::now().format("%Y%m%dT%H%M%SZ");
        let dir = Self::partition_dir(&self.raw_dir, "misc").await?;
        let path = dir.join(format!("{}_{}.json", label, ts));
        let json = serde_json::to_string_pretty(value)?;
        async_fs::write(&path, json).await?;
        info!("Saved raw: {}", path.display());
        Ok(path)
    }

    async fn partition_dir(base_dir: &Path, group: &str) -> Result<PathBuf, PipelineError> {
        let dir = base_dir.join(group).join(Self::date_partition());
        async_fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    // YYYY/MM/DD for the current UTC date
    fn date_partition() -> String {
        Utc::now().format("%Y/%m/%d").to_string()
    }
}

// spaces and path separators would change the artifact's directory,
// so both become underscores ("AC/DC" -> "AC_DC")
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}
