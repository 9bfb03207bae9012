//! Error taxonomy.
//!
//! Startup errors ([`ConfigError`], [`AuthError`], [`DirectoryError`]) are
//! fatal: main logs them and exits non-zero. Per-file errors
//! ([`EncodeError`], [`UploadError`]) are recoverable: the pipeline logs
//! them and moves on to the next file.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Missing or invalid environment configuration. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),
}

/// Credential or token failure while connecting to Drive. Fatal at startup.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unable to read client secret file {path:?}: {source}")]
    ReadSecret {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to parse client secret file: {0}")]
    ParseSecret(#[from] serde_json::Error),

    #[error("invalid authorization endpoint: {0}")]
    BadEndpoint(#[from] url::ParseError),

    #[error("failed to read authorization code: {0}")]
    ReadCode(std::io::Error),

    #[error("token exchange failed: {0}")]
    Exchange(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    TokenRejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unable to cache oauth token: {0}")]
    CacheToken(std::io::Error),
}

/// Transcode failure for a single file. Recoverable: skip the file.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to spawn encoder {binary:?}: {source}")]
    Spawn {
        binary: String,
        source: std::io::Error,
    },

    #[error("encoder exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Drive API failure for a single file or folder call. Recoverable in the
/// pipeline, fatal when hit during startup folder resolution.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unable to open file {path:?}: {source}")]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("drive request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("drive api returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// The watch directory itself could not be read. Fatal.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read directory {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure to establish the filesystem-event subscription. Fatal at startup;
/// event-level errors after that are logged, never raised.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to watch directory: {0}")]
    Subscribe(#[from] notify::Error),
}
