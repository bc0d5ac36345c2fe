//! # Spotify Integration Module
//!
//! The integration layer between the collector and the Spotify Web API.
//! All upstream traffic funnels through [`RetryClient`], which owns the
//! retry/backoff behavior for transient failures and counts successful
//! API calls; [`auth`] performs the client-credentials token exchange and
//! [`catalog`] implements the read endpoints the pipeline consumes.
//!
//! ```text
//! Pipeline Layer (orchestration)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (client credentials)
//!     └── Catalog (genre seeds, artist search, top tracks)
//!          ↓
//! RetryClient (reqwest, backoff, Retry-After)
//!          ↓
//! Spotify Web API
//! ```
//!
//! Read endpoints degrade gracefully: search and top-track failures turn
//! into empty (or partial) results with a logged warning, while
//! authentication failures propagate - without a token nothing else can
//! proceed.

mod auth;
mod catalog;
mod client;

pub use auth::authenticate;
pub use catalog::available_genres;
pub use catalog::search_artists_by_genre;
pub use catalog::top_tracks;
pub use client::RetryClient;
pub use client::RetryPolicy;
