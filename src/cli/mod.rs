//! Command-line interface implementations.
//!
//! Each subcommand lives in its own file and stays thin: resolve defaults
//! from `config`, build the collector, delegate to `pipeline`, and present
//! the outcome. Fatal conditions terminate through the `error!` macro;
//! everything recoverable is reported with `warning!` and the command
//! carries on.

mod batch;
mod collect;
mod genres;
mod status;

pub use batch::batch;
pub use collect::collect;
pub use genres::genres;
pub use status::status;

use crate::{management::{MetricsSink, PrometheusSink}, server, warning};

/// Builds the optional prometheus sink and, when a port was requested,
/// spawns the exposition server for the lifetime of the run. Returns
/// `None` (and keeps going) when the sink cannot be constructed.
pub(crate) fn build_sink(metrics_port: Option<u16>) -> Option<Box<dyn MetricsSink>> {
    let port = metrics_port?;

    match PrometheusSink::new() {
        Ok(sink) => {
            let registry = sink.registry();
            tokio::spawn(async move {
                server::start_metrics_server(port, registry).await;
            });
            Some(Box::new(sink))
        }
        Err(e) => {
            warning!("Prometheus sink unavailable: {}", e);
            None
        }
    }
}
