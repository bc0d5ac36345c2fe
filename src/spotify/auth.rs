use reqwest::StatusCode;
use serde_json::Value;

use crate::{config, error::PipelineError, info, spotify::RetryClient};

/// Exchanges client credentials for a bearer token.
///
/// The credentials are validated locally first: an empty client ID or
/// secret fails with `MissingCredentials` before any network call, so a
/// misconfigured environment is reported instantly instead of producing a
/// confusing upstream 400.
///
/// The exchange itself is one form POST to the token endpoint through the
/// retry client. A final status other than 200, or a response without an
/// `access_token` field, fails with `AuthenticationFailed` carrying the
/// upstream body for diagnostics.
pub async fn authenticate(
    client: &RetryClient,
    client_id: &str,
    client_secret: &str,
) -> Result<String, PipelineError> {
    if client_id.is_empty() || client_secret.is_empty() {
        return Err(PipelineError::MissingCredentials);
    }

    let resp = client
        .post_form(
            &config::spotify_apitoken_url(),
            &[("grant_type", "client_credentials")],
            Some((client_id, client_secret)),
        )
        .await?;

    if resp.status() != StatusCode::OK {
        let body = resp.text().await.unwrap_or_default();
        return Err(PipelineError::AuthenticationFailed(body));
    }

    let json: Value = resp
        .json()
        .await
        .map_err(|e| PipelineError::AuthenticationFailed(e.to_string()))?;

    match json.get("access_token").and_then(|v| v.as_str()) {
        Some(token) => {
            info!("Authenticated with Spotify.");
            Ok(token.to_string())
        }
        None => Err(PipelineError::AuthenticationFailed(json.to_string())),
    }
}
