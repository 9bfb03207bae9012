//! Google Drive v3 REST client.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use tokio_util::io::ReaderStream;
use tracing::info;

use super::auth::{self, Token};
use crate::error::{AuthError, UploadError};
use crate::ports::{FolderPort, UploadResult, UploaderPort};

const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
const FOLDER_MIME: &str = "application/vnd.google-apps.folder";
const MULTIPART_BOUNDARY: &str = "cadenza-upload-boundary";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    #[serde(default)]
    web_view_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Authenticated Drive session. Cheap to clone; clones share the underlying
/// HTTP connection pool.
#[derive(Clone)]
pub struct DriveClient {
    http: reqwest::Client,
    token: Token,
}

impl DriveClient {
    /// Connect using the client secret file at `credentials_path`,
    /// performing the interactive token exchange if no cached token exists.
    pub async fn connect(credentials_path: &Path) -> Result<Self, AuthError> {
        let http = reqwest::Client::new();
        let secret = auth::read_client_secret(credentials_path)?;
        let token = auth::obtain_token(&http, &secret).await?;
        Ok(Self { http, token })
    }

    #[cfg(test)]
    fn with_token(token: Token) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }

    fn bearer(&self) -> &str {
        &self.token.access_token
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, UploadError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Api { status, body });
        }
        Ok(response)
    }
}

/// Multipart/related frame around the streamed file part: the JSON metadata
/// part and opening boundary of the media part, and the closing boundary.
fn multipart_related_frame(metadata: &str) -> (Vec<u8>, Vec<u8>) {
    let mut prologue = Vec::with_capacity(metadata.len() + 256);
    prologue.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    prologue.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    prologue.extend_from_slice(metadata.as_bytes());
    prologue.extend_from_slice(format!("\r\n--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    prologue.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");

    let epilogue = format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).into_bytes();
    (prologue, epilogue)
}

/// Chain the frame halves around the file, chunk by chunk. The file is
/// never buffered whole; peak memory stays at one read chunk regardless of
/// recording size.
fn multipart_related_stream(
    prologue: Vec<u8>,
    file: tokio::fs::File,
    epilogue: Vec<u8>,
) -> impl Stream<Item = std::io::Result<Bytes>> + Send + Sync + 'static {
    stream::iter([Ok::<Bytes, std::io::Error>(Bytes::from(prologue))])
        .chain(ReaderStream::new(file))
        .chain(stream::iter([Ok(Bytes::from(epilogue))]))
}

#[async_trait]
impl UploaderPort for DriveClient {
    /// Upload a file as a multipart/related `files.create` call: a JSON
    /// metadata part naming the target folder as parent, then the file's
    /// bytes streamed from the open handle.
    async fn upload(
        &self,
        local_path: &Path,
        folder_id: &str,
    ) -> Result<UploadResult, UploadError> {
        let file = tokio::fs::File::open(local_path)
            .await
            .map_err(|source| UploadError::OpenFile {
                path: local_path.to_path_buf(),
                source,
            })?;

        let name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata = json!({ "name": name, "parents": [folder_id] });

        let (prologue, epilogue) = multipart_related_frame(&metadata.to_string());
        let body = reqwest::Body::wrap_stream(multipart_related_stream(prologue, file, epilogue));

        let response = self
            .http
            .post(UPLOAD_URL)
            .query(&[("uploadType", "multipart"), ("fields", "id,webViewLink")])
            .bearer_auth(self.bearer())
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(body)
            .send()
            .await?;

        let file: DriveFile = Self::check(response).await?.json().await?;
        if let Some(link) = &file.web_view_link {
            println!("File uploaded successfully: {}", link);
        }

        Ok(UploadResult {
            file_id: file.id,
            web_view_link: file.web_view_link,
        })
    }
}

#[async_trait]
impl FolderPort for DriveClient {
    async fn find_folder(&self, name: &str) -> Result<Option<String>, UploadError> {
        let query = format!(
            "mimeType='{}' and name='{}' and trashed=false",
            FOLDER_MIME,
            name.replace('\'', "\\'")
        );
        let response = self
            .http
            .get(FILES_URL)
            .query(&[("q", query.as_str()), ("fields", "files(id, name)")])
            .bearer_auth(self.bearer())
            .send()
            .await?;

        let list: FileList = Self::check(response).await?.json().await?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    async fn create_folder(&self, name: &str) -> Result<String, UploadError> {
        let response = self
            .http
            .post(FILES_URL)
            .bearer_auth(self.bearer())
            .json(&json!({ "name": name, "mimeType": FOLDER_MIME }))
            .send()
            .await?;

        let folder: DriveFile = Self::check(response).await?.json().await?;
        info!(folder = name, id = %folder.id, "created drive folder");
        Ok(folder.id)
    }

    /// Fetch the object, then update with `addParents` so prior parents are
    /// kept.
    async fn attach_parent(&self, file_id: &str, folder_id: &str) -> Result<(), UploadError> {
        let response = self
            .http
            .get(format!("{}/{}", FILES_URL, file_id))
            .query(&[("fields", "id, parents")])
            .bearer_auth(self.bearer())
            .send()
            .await?;
        Self::check(response).await?.json::<DriveFile>().await?;

        let response = self
            .http
            .patch(format!("{}/{}", FILES_URL, file_id))
            .query(&[("addParents", folder_id), ("fields", "id, parents")])
            .bearer_auth(self.bearer())
            .json(&json!({}))
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }
}
