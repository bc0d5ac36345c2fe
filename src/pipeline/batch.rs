use std::path::Path;

use crate::{
    error::PipelineError, info, management::RotationManager, pipeline::GenreCollector, warning,
};

/// Static genre list used when the live genre listing is unavailable.
pub const FALLBACK_GENRES: &[&str] = &[
    "rock",
    "pop",
    "hiphop",
    "electronic",
    "jazz",
    "classical",
    "metal",
    "reggae",
    "blues",
    "folk",
    "country",
    "latin",
    "soul",
    "punk",
    "disco",
    "funk",
    "rnb",
    "indie",
    "dance",
    "samba",
    "mpb",
    "sertanejo",
    "forro",
    "pagode",
    "bossa nova",
];

/// Collects `batch_size` genres in rotation order, then advances and saves
/// the rotation state.
///
/// A failure in one genre is logged and does not abort the rest of the
/// batch; the index advances exactly once per call regardless of
/// per-genre outcomes, so a failed genre waits for its next natural turn
/// instead of being retried immediately. Returns the genres selected for
/// this batch.
pub async fn run_batch(
    collector: &GenreCollector,
    batch_size: usize,
    rotation_path: &Path,
    quantity: usize,
    market: &str,
) -> Result<Vec<String>, PipelineError> {
    if batch_size == 0 {
        return Ok(Vec::new());
    }

    let mut genres = collector.list_genres().await;
    if genres.is_empty() {
        warning!("Live genre listing unavailable, using the static fallback list");
        genres = FALLBACK_GENRES.iter().map(|g| g.to_string()).collect();
    }

    let mut rotation = RotationManager::load(rotation_path).await;
    if rotation.is_empty() {
        rotation.initialize(genres);
    }

    let selected = rotation.select(batch_size);
    for genre in &selected {
        info!("Batch collecting genre: {}", genre);
        if let Err(e) = collector.run(genre, quantity, market).await {
            warning!("Failed to collect genre {}: {}", genre, e);
        }
    }

    rotation.advance(batch_size);
    rotation.save().await?;
    info!(
        "Rotation updated: index={} total_genres={}",
        rotation.state().index,
        rotation.state().genres.len()
    );

    Ok(selected)
}
