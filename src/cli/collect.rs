use crate::{
    config, error, info, management::CheckpointManager, pipeline::GenreCollector, success, warning,
};

pub async fn collect(
    genre: Option<String>,
    quantity: Option<usize>,
    market: Option<String>,
    force: bool,
    metrics_port: Option<u16>,
) {
    let genre = genre.unwrap_or_else(config::default_genre);
    let quantity = quantity.unwrap_or_else(config::default_artist_count);
    let market = market.unwrap_or_else(config::default_market);
    let data_dir = config::data_dir();

    if force {
        match CheckpointManager::reset(&data_dir, &genre).await {
            Ok(Some(backup)) => info!(
                "Checkpoint moved to {} (forcing reprocessing)",
                backup.display()
            ),
            Ok(None) => {}
            Err(e) => warning!("Failed to back up checkpoint: {}", e),
        }
    }

    let sink = super::build_sink(metrics_port);
    let collector = match GenreCollector::new(data_dir, sink) {
        Ok(collector) => collector,
        Err(e) => error!("Cannot initialize collector. Err: {}", e),
    };

    match collector.run(&genre, quantity, &market).await {
        Ok(collected) if collected.is_empty() => {
            success!("Nothing new for genre {}.", genre)
        }
        Ok(collected) => success!(
            "Processed {} artists for genre {}.",
            collected.len(),
            genre
        ),
        Err(e) => error!("Collection failed: {}", e),
    }
}
