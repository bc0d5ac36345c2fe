use axum::{extract::State, http::StatusCode, response::IntoResponse};
use prometheus::{Encoder, Registry, TextEncoder};

/// Prometheus exposition endpoint rendering the registry the collection
/// run publishes into.
pub async fn metrics(State(registry): State<Registry>) -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    match encoder.encode(&registry.gather(), &mut buffer) {
        Ok(()) => (StatusCode::OK, buffer).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
