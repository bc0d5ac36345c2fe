mod batch;
mod collector;

pub use batch::FALLBACK_GENRES;
pub use batch::run_batch;
pub use collector::GenreCollector;
