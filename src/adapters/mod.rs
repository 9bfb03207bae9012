//! Adapters - Concrete implementations of ports.

pub mod drive;
pub mod ffmpeg;

pub use drive::DriveClient;
pub use ffmpeg::FfmpegTranscoder;
