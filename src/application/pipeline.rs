//! Per-file processing pipeline: classify, transcode, upload.
//!
//! The one contract that matters here is partial-failure isolation: a file
//! that fails to convert or upload is logged and skipped, and every other
//! file still gets processed.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::media::{is_media_file, MediaFile};
use crate::error::{DirectoryError, EncodeError, UploadError};
use crate::ports::{TranscoderPort, UploadResult, UploaderPort};

/// Everything that can abort one file's processing. Never escapes the
/// pipeline; logged at the per-file boundary.
#[derive(Debug, Error)]
enum ProcessError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Sequences classify -> transcode -> upload for discovered media files.
/// The target folder is resolved once by the caller and reused for the
/// whole run.
pub struct PipelineService<U, T> {
    uploader: U,
    transcoder: T,
    folder_id: String,
}

impl<U, T> PipelineService<U, T>
where
    U: UploaderPort,
    T: TranscoderPort,
{
    pub fn new(uploader: U, transcoder: T, folder_id: String) -> Self {
        Self {
            uploader,
            transcoder,
            folder_id,
        }
    }

    /// One-shot scan: list the directory (non-recursive), process each media
    /// file in listing order. Only the directory listing itself is fatal;
    /// individual files fail independently.
    pub async fn scan_and_process(&self, dir: &Path) -> Result<(), DirectoryError> {
        let entries = std::fs::read_dir(dir).map_err(|source| DirectoryError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    error!(error = %e, "failed to read directory entry");
                    continue;
                }
            };
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if is_media_file(&path) {
                info!("Found media file: {}", path.display());
                self.process_media_file(&path).await;
            }
        }

        Ok(())
    }

    /// Process a single media file. Failures are logged here and never
    /// propagated; the return value lets the watch path organize successful
    /// uploads.
    pub async fn process_media_file(&self, path: &Path) -> Option<UploadResult> {
        match self.try_process(path).await {
            Ok((final_path, result)) => {
                info!("Processed and uploaded: {}", final_path.display());
                Some(result)
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "error processing file");
                None
            }
        }
    }

    async fn try_process(&self, path: &Path) -> Result<(PathBuf, UploadResult), ProcessError> {
        let file = MediaFile::new(path.to_path_buf());
        let mut upload_path = file.path.clone();

        if self.transcoder.is_available() {
            // Already-mp4 files go up as they are.
            if file.extension() != Some("mp4") {
                let output = self.transcoder.output_path_for(&file.path);
                self.transcoder.convert(&file.path, &output).await?;
                upload_path = output;
            }
        } else {
            warn!("encoder not found, skipping conversion for this file");
        }

        let result = self.uploader.upload(&upload_path, &self.folder_id).await?;
        Ok((upload_path, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::transcoder::MockTranscoderPort;
    use crate::ports::uploader::MockUploaderPort;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    fn unavailable_transcoder() -> MockTranscoderPort {
        let mut transcoder = MockTranscoderPort::new();
        transcoder.expect_is_available().return_const(false);
        transcoder
    }

    fn ok_result() -> UploadResult {
        UploadResult {
            file_id: "file-1".to_string(),
            web_view_link: None,
        }
    }

    #[tokio::test]
    async fn test_scan_uploads_each_media_file_once() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"a").unwrap();
        fs::write(dir.path().join("b.wav"), b"b").unwrap();
        fs::write(dir.path().join("c.mkv"), b"c").unwrap();
        fs::write(dir.path().join("notes.txt"), b"n").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"j").unwrap();

        let uploaded = Arc::new(Mutex::new(Vec::new()));
        let recorded = uploaded.clone();

        let mut uploader = MockUploaderPort::new();
        uploader
            .expect_upload()
            .times(3)
            .returning(move |path, folder| {
                assert_eq!(folder, "target-folder");
                recorded.lock().unwrap().push(path.to_path_buf());
                Ok(ok_result())
            });

        let pipeline = PipelineService::new(
            uploader,
            unavailable_transcoder(),
            "target-folder".to_string(),
        );
        pipeline.scan_and_process(dir.path()).await.unwrap();

        let mut uploaded = uploaded.lock().unwrap().clone();
        uploaded.sort();
        let mut expected = vec![
            dir.path().join("a.mp3"),
            dir.path().join("b.wav"),
            dir.path().join("c.mkv"),
        ];
        expected.sort();
        assert_eq!(uploaded, expected);
    }

    #[tokio::test]
    async fn test_scan_isolates_per_file_failures() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.mp3"), b"x").unwrap();
        fs::write(dir.path().join("good1.mp3"), b"x").unwrap();
        fs::write(dir.path().join("good2.mp3"), b"x").unwrap();

        let uploaded = Arc::new(Mutex::new(Vec::new()));
        let recorded = uploaded.clone();

        let mut uploader = MockUploaderPort::new();
        uploader
            .expect_upload()
            .times(3)
            .returning(move |path, _| {
                if path.file_name().unwrap() == "bad.mp3" {
                    Err(UploadError::OpenFile {
                        path: path.to_path_buf(),
                        source: std::io::Error::other("simulated transport failure"),
                    })
                } else {
                    recorded.lock().unwrap().push(path.to_path_buf());
                    Ok(ok_result())
                }
            });

        let pipeline =
            PipelineService::new(uploader, unavailable_transcoder(), "root".to_string());
        // The failing file must not abort the batch.
        pipeline.scan_and_process(dir.path()).await.unwrap();

        let mut uploaded = uploaded.lock().unwrap().clone();
        uploaded.sort();
        assert_eq!(
            uploaded,
            vec![dir.path().join("good1.mp3"), dir.path().join("good2.mp3")]
        );
    }

    #[tokio::test]
    async fn test_scan_end_to_end_single_clip() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.mp3");
        fs::write(&clip, b"audio").unwrap();

        let expected = clip.clone();
        let mut uploader = MockUploaderPort::new();
        uploader
            .expect_upload()
            .times(1)
            .withf(move |path, folder| path == expected && folder == "root")
            .returning(|_, _| Ok(ok_result()));

        let pipeline =
            PipelineService::new(uploader, unavailable_transcoder(), "root".to_string());
        assert!(pipeline.scan_and_process(dir.path()).await.is_ok());
    }

    #[tokio::test]
    async fn test_scan_missing_directory_is_fatal() {
        let uploader = MockUploaderPort::new();
        let pipeline = PipelineService::new(
            uploader,
            unavailable_transcoder(),
            "root".to_string(),
        );

        let result = pipeline
            .scan_and_process(Path::new("/nonexistent-watch-dir"))
            .await;
        assert!(matches!(result, Err(DirectoryError::Unreadable { .. })));
    }

    #[tokio::test]
    async fn test_transcode_failure_skips_upload() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.wav");
        fs::write(&clip, b"audio").unwrap();

        let mut transcoder = MockTranscoderPort::new();
        transcoder.expect_is_available().return_const(true);
        transcoder
            .expect_output_path_for()
            .returning(|input| {
                let mut name = input.file_name().unwrap().to_os_string();
                name.push(".mp4");
                input.parent().unwrap().join(name)
            });
        transcoder.expect_convert().returning(|_, _| {
            Err(EncodeError::Spawn {
                binary: "ffmpeg".to_string(),
                source: std::io::Error::other("spawn failed"),
            })
        });

        // No upload expectation: any call would panic the mock.
        let uploader = MockUploaderPort::new();
        let pipeline = PipelineService::new(uploader, transcoder, "root".to_string());
        assert!(pipeline.process_media_file(&clip).await.is_none());
    }

    #[tokio::test]
    async fn test_mp4_is_uploaded_without_conversion() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.mp4");
        fs::write(&clip, b"video").unwrap();

        let mut transcoder = MockTranscoderPort::new();
        transcoder.expect_is_available().return_const(true);
        // convert/output_path_for must not be called for mp4 input.

        let expected = clip.clone();
        let mut uploader = MockUploaderPort::new();
        uploader
            .expect_upload()
            .times(1)
            .withf(move |path, _| path == expected)
            .returning(|_, _| Ok(ok_result()));

        let pipeline = PipelineService::new(uploader, transcoder, "root".to_string());
        assert!(pipeline.process_media_file(&clip).await.is_some());
    }

    #[tokio::test]
    async fn test_converted_file_is_uploaded_under_appended_name() {
        let dir = tempdir().unwrap();
        let clip = dir.path().join("clip.wav");
        fs::write(&clip, b"audio").unwrap();

        let mut transcoder = MockTranscoderPort::new();
        transcoder.expect_is_available().return_const(true);
        transcoder.expect_output_path_for().returning(|input| {
            let mut name = input.file_name().unwrap().to_os_string();
            name.push(".mp4");
            input.parent().unwrap().join(name)
        });
        transcoder.expect_convert().times(1).returning(|_, _| Ok(()));

        let expected = dir.path().join("clip.wav.mp4");
        let mut uploader = MockUploaderPort::new();
        uploader
            .expect_upload()
            .times(1)
            .withf(move |path, _| path == expected)
            .returning(|_, _| Ok(ok_result()));

        let pipeline = PipelineService::new(uploader, transcoder, "root".to_string());
        assert!(pipeline.process_media_file(&clip).await.is_some());
    }
}
