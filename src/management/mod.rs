mod checkpoint;
mod metrics;
mod rotation;

pub use checkpoint::CheckpointManager;
pub use metrics::Metrics;
pub use metrics::MetricsSink;
pub use metrics::MetricsSnapshot;
pub use metrics::PrometheusSink;
pub use rotation::RotationManager;
