//! Live watch mode: filesystem creation events feed the pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use notify::event::{Event, EventKind};
use notify::{RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::domain::media::is_media_file;
use crate::domain::metadata::SessionMetadata;
use crate::error::WatchError;
use crate::ports::{FolderPort, TranscoderPort, UploaderPort};

use super::organizer::Organizer;
use super::pipeline::PipelineService;

/// Subscribes to creation events on the watch folder and runs the pipeline
/// (plus organization) for each new media file.
///
/// Every event spawns its own task: a slow transcode or upload never delays
/// later arrivals, and there is no coalescing of rapid-fire events. Two
/// files sharing a basename can therefore race on the derived output path.
pub struct WatchService<U, T, F> {
    pipeline: Arc<PipelineService<U, T>>,
    organizer: Arc<Organizer<F>>,
    metadata: SessionMetadata,
    dir: PathBuf,
}

impl<U, T, F> WatchService<U, T, F>
where
    U: UploaderPort + 'static,
    T: TranscoderPort + 'static,
    F: FolderPort + 'static,
{
    /// `metadata` is attached to every upload observed by this watcher. No
    /// input source populates it yet, so it is usually empty.
    pub fn new(
        pipeline: PipelineService<U, T>,
        organizer: Organizer<F>,
        metadata: SessionMetadata,
        dir: PathBuf,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            organizer: Arc::new(organizer),
            metadata,
            dir,
        }
    }

    /// Watch until the event stream closes. Only the initial subscription
    /// can fail; event-level errors are logged and the subscription lives
    /// on.
    pub async fn run(&self) -> Result<(), WatchError> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            // Dropped receiver just means the service is shutting down.
            let _ = tx.send(result);
        })?;
        watcher.watch(&self.dir, RecursiveMode::NonRecursive)?;
        info!("Watching {} for new media files", self.dir.display());

        while let Some(result) = rx.recv().await {
            match result {
                Ok(event) if matches!(event.kind, EventKind::Create(_)) => {
                    for path in event.paths {
                        self.dispatch(path);
                    }
                }
                Ok(_) => {}
                Err(e) => error!(error = %e, "watch error"),
            }
        }

        Ok(())
    }

    /// Spawn one independent processing task for a created path.
    fn dispatch(&self, path: PathBuf) {
        if !is_media_file(&path) {
            return;
        }
        info!("New media file detected: {}", path.display());

        let pipeline = self.pipeline.clone();
        let organizer = self.organizer.clone();
        let metadata = self.metadata.clone();
        tokio::spawn(async move {
            if let Some(result) = pipeline.process_media_file(&path).await {
                if let Err(e) = organizer.organize(&result.file_id, &metadata).await {
                    error!(file = %path.display(), error = %e, "error organizing file");
                }
            }
        });
    }
}
