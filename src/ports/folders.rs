use async_trait::async_trait;

use crate::error::UploadError;

/// Remote folder operations used for upload targeting and post-upload
/// organization.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FolderPort: Send + Sync {
    /// Look up a folder by exact name. First match wins; ordering is
    /// whatever the backend returns.
    async fn find_folder(&self, name: &str) -> Result<Option<String>, UploadError>;

    /// Create a folder, returning its ID
    async fn create_folder(&self, name: &str) -> Result<String, UploadError>;

    /// Add a folder to an object's parent set without removing prior parents
    async fn attach_parent(&self, file_id: &str, folder_id: &str) -> Result<(), UploadError>;
}
