use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::EncodeError;

/// Seam over the external encoder so the pipeline can be tested without
/// spawning processes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscoderPort: Send + Sync {
    /// Whether the encoder binary is resolvable. When it is not, the
    /// pipeline skips conversion and uploads originals unchanged.
    fn is_available(&self) -> bool;

    /// Deterministic output path for a converted file
    fn output_path_for(&self, input: &Path) -> PathBuf;

    /// Convert `input` into `output`, blocking until the encoder exits
    async fn convert(&self, input: &Path, output: &Path) -> Result<(), EncodeError>;
}
