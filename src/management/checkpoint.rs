use std::{
    collections::HashSet,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::PipelineError, info, warning};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CheckpointFile {
    processed_artists: Vec<String>,
}

/// Durable record of which artist IDs were already processed for a genre.
///
/// One JSON file per genre under `<data>/checkpoints/`. A missing file is a
/// fresh start; a corrupt file is also a fresh start (with a warning) so a
/// damaged checkpoint can never block collection.
pub struct CheckpointManager {
    genre: String,
    base_dir: PathBuf,
    processed: HashSet<String>,
}

impl CheckpointManager {
    pub async fn load(base_dir: &Path, genre: &str) -> Self {
        let path = Self::checkpoint_path(base_dir, genre);
        let processed = match async_fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<CheckpointFile>(&content) {
                Ok(file) => file.processed_artists.into_iter().collect(),
                Err(_) => {
                    warning!(
                        "Failed to read checkpoint {}, starting fresh",
                        path.display()
                    );
                    HashSet::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => HashSet::new(),
            Err(_) => {
                warning!(
                    "Failed to read checkpoint {}, starting fresh",
                    path.display()
                );
                HashSet::new()
            }
        };

        Self {
            genre: genre.to_string(),
            base_dir: base_dir.to_path_buf(),
            processed,
        }
    }

    pub fn contains(&self, artist_id: &str) -> bool {
        self.processed.contains(artist_id)
    }

    pub fn add(&mut self, artist_id: String) {
        self.processed.insert(artist_id);
    }

    pub fn count(&self) -> usize {
        self.processed.len()
    }

    /// Persists the checkpoint atomically: the content is written to a
    /// temporary file first and then renamed over the real path, so a
    /// reader never observes a partially written checkpoint.
    pub async fn save(&self) -> Result<(), PipelineError> {
        let path = Self::checkpoint_path(&self.base_dir, &self.genre);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let mut processed_artists: Vec<String> = self.processed.iter().cloned().collect();
        processed_artists.sort();
        let json = serde_json::to_string_pretty(&CheckpointFile { processed_artists })?;

        let tmp = path.with_extension("json.tmp");
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &path).await?;
        info!("Checkpoint saved: {}", path.display());
        Ok(())
    }

    /// Moves an existing checkpoint aside to a `.bak` file instead of
    /// deleting it, preserving the previous processed set for inspection.
    /// Returns the backup path, or `None` when no checkpoint existed.
    pub async fn reset(base_dir: &Path, genre: &str) -> Result<Option<PathBuf>, PipelineError> {
        let path = Self::checkpoint_path(base_dir, genre);
        if async_fs::metadata(&path).await.is_err() {
            return Ok(None);
        }

        let backup = path.with_extension("json.bak");
        async_fs::rename(&path, &backup).await?;
        Ok(Some(backup))
    }

    fn checkpoint_path(base_dir: &Path, genre: &str) -> PathBuf {
        base_dir
            .join("checkpoints")
            .join(format!("checkpoint_{}.json", genre))
    }
}
