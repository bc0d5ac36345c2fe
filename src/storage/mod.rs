mod db;
mod persist;

pub use db::TrackStore;
pub use persist::Persister;
