//! Spotify Genre Collector CLI Library
//!
//! This library implements an ingestion pipeline that collects per-genre
//! artist and top-track metadata from the Spotify Web API, persists raw and
//! normalized snapshots to partitioned JSON files and a local SQLite store,
//! and tracks progress in resumable per-genre checkpoints.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the optional metrics exposition server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The crate-wide error taxonomy
//! - `management` - Durable local state: checkpoints, rotation, metrics
//! - `pipeline` - Genre orchestration and batch rotation
//! - `server` - Local HTTP server exposing `/health` and `/metrics`
//! - `spotify` - Spotify Web API client implementation
//! - `storage` - Artifact files and the SQLite track store
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use spotharvest::{config, pipeline::GenreCollector};
//!
//! #[tokio::main]
//! async fn main() -> spotharvest::Res<()> {
//!     config::load_env().await?;
//!     let collector = GenreCollector::new(config::data_dir(), None)?;
//!     let collected = collector.run("rock", 10, "BR").await?;
//!     println!("processed {} artists", collected.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod storage;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Collecting artist: {}", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Processed {} artists", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Reserved for unrecoverable
/// errors at the CLI layer; library code returns `Result` instead.
///
/// # Example
///
/// ```
/// error!("Authentication failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program
/// termination, like a corrupt checkpoint being reset or a failed
/// best-effort database write.
///
/// # Example
///
/// ```
/// warning!("Failed to read checkpoint {}, starting fresh", path.display());
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
