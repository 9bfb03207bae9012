//! Upload targeting and post-upload organization.

use chrono::Local;
use tracing::info;

use crate::domain::metadata::SessionMetadata;
use crate::error::UploadError;
use crate::ports::FolderPort;

/// Resolve the upload target folder, once per run.
///
/// An explicit ID wins verbatim, with no existence check. Otherwise an
/// exact-name lookup runs, creating the folder on a miss. With neither
/// configured, uploads land in the Drive root.
pub async fn resolve_folder<F: FolderPort>(
    folders: &F,
    folder_id: &str,
    folder_name: &str,
) -> Result<String, UploadError> {
    if !folder_id.is_empty() {
        return Ok(folder_id.to_string());
    }
    if !folder_name.is_empty() {
        if let Some(id) = folders.find_folder(folder_name).await? {
            return Ok(id);
        }
        return folders.create_folder(folder_name).await;
    }
    Ok("root".to_string())
}

/// Files an uploaded object into a dated session folder and records its tag
/// metadata.
pub struct Organizer<F> {
    folders: F,
}

impl<F: FolderPort> Organizer<F> {
    pub fn new(folders: F) -> Self {
        Self { folders }
    }

    /// Create (or re-create) today's `"<date> - <group>"` folder and attach
    /// it as an additional parent of the uploaded object. Prior parents are
    /// kept, so the object stays visible in the upload target too.
    pub async fn organize(
        &self,
        file_id: &str,
        metadata: &SessionMetadata,
    ) -> Result<(), UploadError> {
        let folder_name = format!(
            "{} - {}",
            Local::now().format("%Y-%m-%d"),
            metadata.group_name
        );

        let folder_id = self.folders.create_folder(&folder_name).await?;
        self.folders.attach_parent(file_id, &folder_id).await?;
        self.save_metadata(metadata, &folder_id);

        info!(file = file_id, folder = %folder_name, "organized upload");
        Ok(())
    }

    /// Metadata persistence is not implemented yet: tags are accepted and
    /// dropped.
    fn save_metadata(&self, _metadata: &SessionMetadata, _folder_id: &str) {}
}
