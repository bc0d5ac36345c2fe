use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use chrono::Utc;
use prometheus::{IntCounter, IntGauge, Registry};
use serde::{Deserialize, Serialize};

use crate::{error::PipelineError, info};

/// Run-scoped counters for the ingestion pipeline.
///
/// Created per collector and shared with the retry client through an
/// `Arc`; atomics keep increments free of locking. Counters reset with the
/// process - durable history lives in the flushed snapshot files.
#[derive(Debug, Default)]
pub struct Metrics {
    api_calls: AtomicU64,
    artists_processed: AtomicU64,
    tracks_processed: AtomicU64,
}

/// Point-in-time copy of the counters, serialized to snapshot files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub api_calls: u64,
    pub artists_processed: u64,
    pub tracks_processed: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incr_api_calls(&self, amount: u64) {
        self.api_calls.fetch_add(amount, Ordering::Relaxed);
    }

    pub fn incr_artists_processed(&self, amount: u64) {
        self.artists_processed.fetch_add(amount, Ordering::Relaxed);
    }

    pub fn incr_tracks_processed(&self, amount: u64) {
        self.tracks_processed.fetch_add(amount, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            api_calls: self.api_calls.load(Ordering::Relaxed),
            artists_processed: self.artists_processed.load(Ordering::Relaxed),
            tracks_processed: self.tracks_processed.load(Ordering::Relaxed),
        }
    }

    /// Writes a timestamped snapshot file under `data_dir` and forwards the
    /// snapshot to the optional external sink. Sink absence or failure never
    /// affects the run.
    pub async fn flush(
        &self,
        data_dir: &Path,
        sink: Option<&dyn MetricsSink>,
    ) -> Result<PathBuf, PipelineError> {
        let snapshot = self.snapshot();
        async_fs::create_dir_all(data_dir).await?;

        let ts = Utc::now().format("%Y%m%dT%H%M%SZ");
        let path = data_dir.join(format!("metrics_{}.json", ts));
        let json = serde_json::to_string_pretty(&snapshot)?;
        async_fs::write(&path, json).await?;
        info!("Metrics saved: {}", path.display());

        if let Some(sink) = sink {
            sink.publish(&snapshot);
        }

        Ok(path)
    }
}

/// Optional external destination for flushed metrics.
///
/// Counter semantics: each publish carries cumulative run totals and the
/// sink is responsible for turning those into monotonic increases.
pub trait MetricsSink: Send + Sync {
    fn publish(&self, snapshot: &MetricsSnapshot);
}

/// Bridges run counters into a prometheus `Registry`, exposed over HTTP by
/// `server::start_metrics_server`.
pub struct PrometheusSink {
    registry: Registry,
    api_calls: IntCounter,
    artists_processed: IntCounter,
    tracks_processed: IntCounter,
    last_run: IntGauge,
    published: Published,
}

#[derive(Default)]
struct Published {
    api_calls: AtomicU64,
    artists_processed: AtomicU64,
    tracks_processed: AtomicU64,
}

impl PrometheusSink {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let api_calls = IntCounter::new("spotify_api_calls_total", "Total Spotify API calls")?;
        let artists_processed =
            IntCounter::new("spotify_artists_processed_total", "Artists processed")?;
        let tracks_processed =
            IntCounter::new("spotify_tracks_processed_total", "Tracks processed")?;
        let last_run = IntGauge::new("spotify_last_run_timestamp", "Last run timestamp (unix)")?;

        registry.register(Box::new(api_calls.clone()))?;
        registry.register(Box::new(artists_processed.clone()))?;
        registry.register(Box::new(tracks_processed.clone()))?;
        registry.register(Box::new(last_run.clone()))?;

        Ok(Self {
            registry,
            api_calls,
            artists_processed,
            tracks_processed,
            last_run,
            published: Published::default(),
        })
    }

    pub fn registry(&self) -> Registry {
        self.registry.clone()
    }

    fn delta(published: &AtomicU64, total: u64) -> u64 {
        let prev = published.swap(total, Ordering::Relaxed);
        total.saturating_sub(prev)
    }
}

impl MetricsSink for PrometheusSink {
    fn publish(&self, snapshot: &MetricsSnapshot) {
        // snapshots carry cumulative totals; only the delta since the last
        // publish goes into the monotonic counters
        self.api_calls
            .inc_by(Self::delta(&self.published.api_calls, snapshot.api_calls));
        self.artists_processed.inc_by(Self::delta(
            &self.published.artists_processed,
            snapshot.artists_processed,
        ));
        self.tracks_processed.inc_by(Self::delta(
            &self.published.tracks_processed,
            snapshot.tracks_processed,
        ));
        self.last_run.set(Utc::now().timestamp());
    }
}
