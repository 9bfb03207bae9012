//! Environment configuration.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable holding the path to the Google API client secret
/// JSON file. Required; startup fails without it.
pub const CREDENTIALS_VAR: &str = "CADENZA_CREDENTIALS";

/// Fixed relative path of the cached OAuth token.
pub const TOKEN_CACHE_PATH: &str = "token.json";

/// Configuration loaded from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// Folder monitored for new media files
    pub watch_folder: String,
    /// Explicit Drive folder ID (takes precedence over the name if set)
    pub drive_folder_id: String,
    /// Drive folder name, looked up or created when no ID is set. With
    /// neither ID nor name configured, uploads land in the Drive root.
    pub drive_folder_name: String,
    /// Path or name of the ffmpeg binary
    pub ffmpeg_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            watch_folder: env::var("CADENZA_WATCH_FOLDER")
                .unwrap_or_else(|_| String::from("./watched")),
            drive_folder_id: env::var("CADENZA_DRIVE_FOLDER_ID").unwrap_or_default(),
            drive_folder_name: env::var("CADENZA_DRIVE_FOLDER_NAME").unwrap_or_default(),
            ffmpeg_path: env::var("CADENZA_FFMPEG_PATH").unwrap_or_else(|_| String::from("ffmpeg")),
        }
    }
}

/// Path of the client secret file from `CADENZA_CREDENTIALS`.
pub fn credentials_path() -> Result<PathBuf, ConfigError> {
    match env::var(CREDENTIALS_VAR) {
        Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Err(ConfigError::MissingVar(CREDENTIALS_VAR)),
    }
}
