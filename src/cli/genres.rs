use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{config, error, pipeline::{FALLBACK_GENRES, GenreCollector}, success, warning};

pub async fn genres() {
    let collector = match GenreCollector::new(config::data_dir(), None) {
        Ok(collector) => collector,
        Err(e) => error!("Cannot initialize collector. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching available genres...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let genres = collector.list_genres().await;
    pb.finish_and_clear();

    if genres.is_empty() {
        warning!("No genres returned by the API, showing the static fallback list");
        for genre in FALLBACK_GENRES {
            println!("{}", genre);
        }
        return;
    }

    for genre in &genres {
        println!("{}", genre);
    }
    success!("{} genres available.", genres.len());
}
