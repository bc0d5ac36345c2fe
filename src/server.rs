use axum::{Router, routing::get};
use prometheus::Registry;

use crate::{api, warning};

/// Serves `/health` and `/metrics` on localhost for the lifetime of the
/// collection run. Binding or serving failures only disable the endpoint;
/// the run itself continues.
pub async fn start_metrics_server(port: u16, registry: Registry) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/metrics", get(api::metrics))
        .with_state(registry);

    let addr = format!("127.0.0.1:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            warning!("Cannot bind metrics server on {}: {}", addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        warning!("Metrics server terminated: {}", e);
    }
}
