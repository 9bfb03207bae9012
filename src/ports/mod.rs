//! Ports - Trait definitions.

pub mod folders;
pub mod transcoder;
pub mod uploader;

pub use folders::FolderPort;
pub use transcoder::TranscoderPort;
pub use uploader::{UploadResult, UploaderPort};
