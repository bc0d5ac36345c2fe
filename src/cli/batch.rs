use std::path::PathBuf;

use crate::{config, error, pipeline, pipeline::GenreCollector, success};

pub async fn batch(
    size: usize,
    rotation_file: Option<PathBuf>,
    quantity: Option<usize>,
    market: Option<String>,
    metrics_port: Option<u16>,
) {
    let data_dir = config::data_dir();
    let rotation_path =
        rotation_file.unwrap_or_else(|| data_dir.join("checkpoints/genre_rotation.json"));
    let quantity = quantity.unwrap_or_else(config::default_artist_count);
    let market = market.unwrap_or_else(config::default_market);

    let sink = super::build_sink(metrics_port);
    let collector = match GenreCollector::new(data_dir, sink) {
        Ok(collector) => collector,
        Err(e) => error!("Cannot initialize collector. Err: {}", e),
    };

    match pipeline::run_batch(&collector, size, &rotation_path, quantity, &market).await {
        Ok(selected) => success!("Batch finished: {}", selected.join(", ")),
        Err(e) => error!("Batch failed: {}", e),
    }
}
