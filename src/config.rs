//! Configuration management for the Spotify genre collector.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. The configuration system follows
//! a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults
//!
//! Unlike endpoint URLs and collection defaults, the client credentials
//! have no fallback: the accessors return an empty string and the
//! authenticator turns that into a `MissingCredentials` error before any
//! network call is made.

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `spotharvest/.env`. A missing `.env` file is
/// not an error - configuration may come entirely from the process
/// environment (CI, cron), and variables already set there are never
/// overwritten.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotharvest/.env`
/// - macOS: `~/Library/Application Support/spotharvest/.env`
/// - Windows: `%LOCALAPPDATA%/spotharvest/.env`
///
/// # Errors
///
/// Returns an error only if the parent directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotharvest/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    let _ = dotenv::from_path(path);
    Ok(())
}

/// Returns the Spotify API client ID, or an empty string if unset.
///
/// The empty-string fallback is deliberate: credential presence is
/// validated by `spotify::authenticate`, which maps an empty value to
/// `PipelineError::MissingCredentials`.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").unwrap_or_default()
}

/// Returns the Spotify API client secret, or an empty string if unset.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default()
}

/// Returns the Spotify Web API base URL.
///
/// Overridable through `SPOTIFY_API_URL`; the integration tests point this
/// at a local stub server.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the client-credentials token exchange URL.
///
/// Overridable through `SPOTIFY_API_TOKEN_URL`.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the base directory for all collector state and artifacts.
///
/// `DATA_DIR` overrides the default of `spotharvest/data` under the
/// platform-specific local data directory. Checkpoints, rotation state,
/// raw/processed artifacts, metrics snapshots and the SQLite store all
/// live below this directory.
pub fn data_dir() -> PathBuf {
    match env::var("DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("spotharvest/data");
            path
        }
    }
}

/// Returns the default genre for collection runs (`SPOTIFY_GENRE`, default `rock`).
pub fn default_genre() -> String {
    env::var("SPOTIFY_GENRE").unwrap_or_else(|_| "rock".to_string())
}

/// Returns the default number of artists per run (`SPOTIFY_ARTIST_COUNT`, default 10).
pub fn default_artist_count() -> usize {
    env::var("SPOTIFY_ARTIST_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10)
}

/// Returns the default market for top-track lookups (`SPOTIFY_MARKET`, default `BR`).
pub fn default_market() -> String {
    env::var("SPOTIFY_MARKET").unwrap_or_else(|_| "BR".to_string())
}
