use std::path::{Path, PathBuf};

use tabled::Table;

use crate::{
    config, info,
    management::{CheckpointManager, RotationManager},
    storage::TrackStore,
    types::GenreStatusRow,
};

pub async fn status(rotation_file: Option<PathBuf>) {
    let data_dir = config::data_dir();
    let rotation_path =
        rotation_file.unwrap_or_else(|| data_dir.join("checkpoints/genre_rotation.json"));

    let rotation = RotationManager::load(&rotation_path).await;
    let state = rotation.state();
    if state.genres.is_empty() {
        info!("No rotation state at {}", rotation_path.display());
    } else {
        info!(
            "Rotation: {} genres, next index {}",
            state.genres.len(),
            state.index
        );
    }

    let store = TrackStore::open(&data_dir.join("spotharvest.db")).ok();

    let mut rows: Vec<GenreStatusRow> = Vec::new();
    for genre in checkpoint_genres(&data_dir) {
        let checkpoint = CheckpointManager::load(&data_dir, &genre).await;
        let stored_tracks = store
            .as_ref()
            .and_then(|s| s.count_tracks_for_genre(&genre).ok())
            .unwrap_or(0);
        rows.push(GenreStatusRow {
            processed_artists: checkpoint.count(),
            stored_tracks,
            genre,
        });
    }

    if rows.is_empty() {
        info!("No checkpoints yet.");
        return;
    }

    let table = Table::new(rows);
    println!("{}", table);
}

// genres that have a checkpoint file on disk
fn checkpoint_genres(data_dir: &Path) -> Vec<String> {
    let dir = data_dir.join("checkpoints");
    let mut genres: Vec<String> = Vec::new();

    if let Ok(entries) = std::fs::read_dir(&dir) {
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(genre) = name
                .strip_prefix("checkpoint_")
                .and_then(|n| n.strip_suffix(".json"))
            {
                genres.push(genre.to_string());
            }
        }
    }

    genres.sort();
    genres
}
