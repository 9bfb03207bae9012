//! ffmpeg subprocess transcoder.

use async_trait::async_trait;
use std::env;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::error::EncodeError;
use crate::ports::TranscoderPort;

/// Transcoder backed by an external ffmpeg binary, invoked one file at a
/// time. Output is MP4 with AAC audio at 192k.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: String,
}

impl FfmpegTranscoder {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }
}

/// Resolve a binary the way `exec.LookPath` does: a name containing a path
/// separator is checked directly, a bare name is searched on `$PATH`.
fn find_binary(binary: &str) -> Option<PathBuf> {
    if binary.contains(std::path::MAIN_SEPARATOR) {
        let path = Path::new(binary);
        return path.is_file().then(|| path.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

#[async_trait]
impl TranscoderPort for FfmpegTranscoder {
    fn is_available(&self) -> bool {
        find_binary(&self.binary).is_some()
    }

    /// The `.mp4` suffix is appended to the full file name rather than
    /// replacing the extension: `song.wav` becomes `song.wav.mp4`.
    fn output_path_for(&self, input: &Path) -> PathBuf {
        let dir = input.parent().unwrap_or_else(|| Path::new(""));
        let mut name = input
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".mp4");
        dir.join(name)
    }

    async fn convert(&self, input: &Path, output: &Path) -> Result<(), EncodeError> {
        let result = Command::new(&self.binary)
            .arg("-i")
            .arg(input)
            .arg("-codec:a")
            .arg("aac")
            .arg("-b:a")
            .arg("192k")
            .arg(output)
            .output()
            .await
            .map_err(|source| EncodeError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(EncodeError::Failed {
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_appends_suffix() {
        let transcoder = FfmpegTranscoder::new("ffmpeg".to_string());
        assert_eq!(
            transcoder.output_path_for(Path::new("/a/b/song.wav")),
            PathBuf::from("/a/b/song.wav.mp4")
        );
    }

    #[test]
    fn test_output_path_without_extension() {
        let transcoder = FfmpegTranscoder::new("ffmpeg".to_string());
        assert_eq!(
            transcoder.output_path_for(Path::new("/a/b/voicenote")),
            PathBuf::from("/a/b/voicenote.mp4")
        );
    }

    #[test]
    fn test_unavailable_for_unknown_binary() {
        let transcoder = FfmpegTranscoder::new("definitely-not-an-encoder-7f3a".to_string());
        assert!(!transcoder.is_available());
    }

    #[test]
    fn test_available_for_explicit_existing_file() {
        // Any plain file works for availability; the binary is only run in
        // convert().
        let file = tempfile::NamedTempFile::new().unwrap();
        let transcoder = FfmpegTranscoder::new(file.path().to_str().unwrap().to_string());
        assert!(transcoder.is_available());
    }

    #[tokio::test]
    async fn test_convert_spawn_failure() {
        let transcoder = FfmpegTranscoder::new("definitely-not-an-encoder-7f3a".to_string());
        let result = transcoder
            .convert(Path::new("/tmp/in.wav"), Path::new("/tmp/out.wav.mp4"))
            .await;
        assert!(matches!(result, Err(EncodeError::Spawn { .. })));
    }
}
