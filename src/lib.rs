//! Cadenza - Session Recording Uploader
//!
//! Watches a folder for media files exported from chat apps, transcodes them
//! to MP4 through an external ffmpeg, and uploads them to Google Drive.
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (classification, metadata, export parsing, dedup)
//! - ports/: Trait definitions (uploader, folders, transcoder)
//! - adapters/: Concrete implementations (Drive REST client, ffmpeg subprocess)
//! - application/: Generic services (pipeline, watcher, organizer)
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use adapters::{DriveClient, FfmpegTranscoder};
pub use application::{resolve_folder, Organizer, PipelineService, WatchService};
pub use config::Config;
pub use domain::media::is_media_file;
pub use domain::metadata::SessionMetadata;
