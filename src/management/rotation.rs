use std::path::{Path, PathBuf};

use crate::{error::PipelineError, types::RotationState, warning};

/// Round-robin scheduling state for batch genre collection.
///
/// The genre list is fixed once initialized; `index` marks where the next
/// batch starts and wraps modulo the list length. State is persisted to a
/// JSON file between invocations.
pub struct RotationManager {
    path: PathBuf,
    state: RotationState,
}

impl RotationManager {
    pub async fn load(path: &Path) -> Self {
        let state = match async_fs::read_to_string(path).await {
            Ok(content) => match serde_json::from_str::<RotationState>(&content) {
                Ok(state) => state,
                Err(_) => {
                    warning!(
                        "Failed to read rotation state {}, starting fresh",
                        path.display()
                    );
                    RotationState::default()
                }
            },
            Err(_) => RotationState::default(),
        };

        Self {
            path: path.to_path_buf(),
            state,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.genres.is_empty()
    }

    pub fn initialize(&mut self, genres: Vec<String>) {
        self.state.genres = genres;
        self.state.index = 0;
    }

    /// Selects `batch_size` genres starting at the current index, wrapping
    /// circularly; a batch larger than the list repeats genres.
    pub fn select(&self, batch_size: usize) -> Vec<String> {
        let total = self.state.genres.len();
        if total == 0 {
            return Vec::new();
        }

        (0..batch_size)
            .map(|i| self.state.genres[(self.state.index + i) % total].clone())
            .collect()
    }

    pub fn advance(&mut self, batch_size: usize) {
        let total = self.state.genres.len();
        if total > 0 {
            self.state.index = (self.state.index + batch_size) % total;
        }
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub async fn save(&self) -> Result<(), PipelineError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.state)?;
        let tmp = self.path.with_extension("json.tmp");
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
