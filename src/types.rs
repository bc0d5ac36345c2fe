use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

/// An artist as returned by the Spotify search endpoint.
///
/// Only `id` and `name` are interpreted by the pipeline; everything else
/// the upstream sends (genres, followers, popularity, images, ...) is kept
/// in `extra` so raw snapshots reproduce the upstream payload unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A top track for one artist, scoped to one genre during persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: ArtistsPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsPage {
    pub items: Vec<Artist>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreSeedsResponse {
    pub genres: Vec<String>,
}

/// A normalized track record as written to processed artifact files.
///
/// The struct fields carry the descriptive names; the serde renames pin
/// the wire keys of the processed-file format, which downstream consumers
/// (dashboard, exploration scripts) already parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedTrack {
    #[serde(rename = "artista")]
    pub artist_name: String,
    #[serde(rename = "musica")]
    pub track_name: String,
    #[serde(rename = "popularidade")]
    pub popularity: Option<u32>,
    pub preview_url: Option<String>,
    #[serde(rename = "id")]
    pub track_id: String,
    #[serde(rename = "duracao_ms")]
    pub duration_ms: Option<u64>,
}

impl ProcessedTrack {
    pub fn normalize(artist_name: &str, track: &Track) -> Self {
        Self {
            artist_name: artist_name.to_string(),
            track_name: track.name.clone(),
            popularity: track.popularity,
            preview_url: track.preview_url.clone(),
            track_id: track.id.clone(),
            duration_ms: track.duration_ms,
        }
    }
}

/// One artist processed during a collection run: its ID and the processed
/// artifact file the run produced for it.
#[derive(Debug, Clone)]
pub struct CollectedArtist {
    pub artist_id: String,
    pub processed_path: PathBuf,
}

/// Rotation state persisted between batch invocations.
///
/// Invariant: `index < genres.len()` whenever `genres` is non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RotationState {
    pub genres: Vec<String>,
    pub index: usize,
}

#[derive(Tabled)]
pub struct GenreStatusRow {
    pub genre: String,
    pub processed_artists: usize,
    pub stored_tracks: i64,
}
