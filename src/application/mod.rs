//! Application layer - Generic services that use ports.

pub mod organizer;
pub mod pipeline;
pub mod watcher;

pub use organizer::{resolve_folder, Organizer};
pub use pipeline::PipelineService;
pub use watcher::WatchService;
