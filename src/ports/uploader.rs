use async_trait::async_trait;
use std::path::Path;

use crate::error::UploadError;

/// Remote reference to an uploaded object.
#[derive(Debug, Clone)]
pub struct UploadResult {
    /// Backend object ID
    pub file_id: String,
    /// Browser link to the uploaded object, if the backend returned one
    pub web_view_link: Option<String>,
}

/// Narrow upload seam: (local path, folder id) -> remote reference. Concrete
/// storage backends stay swappable and tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploaderPort: Send + Sync {
    /// Upload a local file into the given remote folder
    async fn upload(&self, local_path: &Path, folder_id: &str)
        -> Result<UploadResult, UploadError>;
}
