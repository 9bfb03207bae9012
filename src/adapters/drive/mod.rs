//! Google Drive storage adapter: OAuth session, folder ops, upload.

pub mod auth;
pub mod client;

pub use auth::Token;
pub use client::DriveClient;
