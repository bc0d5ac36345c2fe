use std::{path::PathBuf, sync::Arc};

use crate::{
    config,
    error::PipelineError,
    info,
    management::{CheckpointManager, Metrics, MetricsSink},
    spotify::{self, RetryClient},
    storage::{Persister, TrackStore},
    types::CollectedArtist,
    warning,
};

/// Drives one genre's end-to-end collection run.
///
/// A run moves through authenticate → list candidates → per-artist
/// fetch/persist/checkpoint → metrics flush. The checkpoint is saved after
/// every successfully persisted artist, so a crash loses at most the
/// artist that was in flight; on the next run the checkpointed artists are
/// skipped without side effects.
pub struct GenreCollector {
    client: RetryClient,
    persister: Persister,
    metrics: Arc<Metrics>,
    data_dir: PathBuf,
    sink: Option<Box<dyn MetricsSink>>,
}

impl GenreCollector {
    pub fn new(
        data_dir: PathBuf,
        sink: Option<Box<dyn MetricsSink>>,
    ) -> Result<Self, PipelineError> {
        let metrics = Arc::new(Metrics::new());
        let client = RetryClient::new(Arc::clone(&metrics))?;

        // file artifacts are the primary record; without the store the run
        // simply degrades to files only
        let store = match TrackStore::open(&data_dir.join("spotharvest.db")) {
            Ok(store) => Some(store),
            Err(e) => {
                warning!("Track store unavailable, continuing with files only: {}", e);
                None
            }
        };
        let persister = Persister::new(&data_dir, store, Arc::clone(&metrics));

        Ok(Self {
            client,
            persister,
            metrics,
            data_dir,
            sink,
        })
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Lists the upstream genre seeds; empty when credentials are missing
    /// or the listing fails, in which case callers use the fallback list.
    pub async fn list_genres(&self) -> Vec<String> {
        let token = match spotify::authenticate(
            &self.client,
            &config::spotify_client_id(),
            &config::spotify_client_secret(),
        )
        .await
        {
            Ok(token) => token,
            Err(_) => return Vec::new(),
        };

        spotify::available_genres(&self.client, &token).await
    }

    /// Collects up to `quantity` artists for `genre`, skipping artists the
    /// checkpoint already records. Returns only the artists actually
    /// processed during this run - an empty result may simply mean
    /// everything was checkpointed already.
    pub async fn run(
        &self,
        genre: &str,
        quantity: usize,
        market: &str,
    ) -> Result<Vec<CollectedArtist>, PipelineError> {
        let token = spotify::authenticate(
            &self.client,
            &config::spotify_client_id(),
            &config::spotify_client_secret(),
        )
        .await?;

        let artists =
            spotify::search_artists_by_genre(&self.client, genre, &token, quantity, 50).await;

        let mut checkpoint = CheckpointManager::load(&self.data_dir, genre).await;
        let mut collected: Vec<CollectedArtist> = Vec::new();

        for artist in artists {
            if checkpoint.contains(&artist.id) {
                info!("Skipping already processed artist: {}", artist.id);
                continue;
            }

            info!("Collecting artist: {}", artist.name);
            self.persister
                .persist_raw(&format!("artist_{}", artist.id), &artist)
                .await?;

            let tracks = spotify::top_tracks(&self.client, &artist.id, &token, market).await;
            self.persister
                .persist_raw(&format!("toptracks_{}", artist.id), &tracks)
                .await?;

            let processed_path = self.persister.persist(&artist, &tracks, genre).await?;
            collected.push(CollectedArtist {
                artist_id: artist.id.clone(),
                processed_path,
            });

            // checkpoint only after the artifact exists, and immediately,
            // so a crash cannot mark an artist processed without one
            checkpoint.add(artist.id);
            checkpoint.save().await?;
        }

        if let Err(e) = self.metrics.flush(&self.data_dir, self.sink.as_deref()).await {
            warning!("Failed to save metrics snapshot: {}", e);
        }

        Ok(collected)
    }
}
