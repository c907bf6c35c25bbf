//! Motion-mask delta pipeline driver.
//!
//! Enumerates a frame sequence, loads the background reference once, and
//! runs the chunked sequencer: per-frame foreground masks are computed
//! concurrently while delta images are still emitted in strict frame
//! order across chunk boundaries.

pub mod config;
pub mod enumerate;
pub mod error;
pub mod sequencer;

use std::sync::Arc;

use tracing::info;

use roto_media::decode_rgb;
use roto_models::{PipelineSummary, ProgressCallback};

pub use config::{PipelineArgs, PipelineConfig};
pub use error::{WorkerError, WorkerResult};
pub use sequencer::ChunkSequencer;

/// Run the full pipeline for a validated configuration.
///
/// Fatal errors (enumeration, background load) abort; per-frame failures
/// are recorded in the summary and leave gaps in the output sequence.
pub async fn run_pipeline(
    config: &PipelineConfig,
    progress: Option<ProgressCallback>,
) -> WorkerResult<PipelineSummary> {
    if !config.keep_output {
        let removed = enumerate::clear_output_dir(&config.output_dir).await?;
        if removed > 0 {
            info!(removed, "cleared stale files from output folder");
        }
    }

    let frames = enumerate::discover_frames(&config.input_dir, &config.extensions).await?;
    if frames.is_empty() {
        info!(input_dir = %config.input_dir.display(), "no frames found");
        return Ok(PipelineSummary::default());
    }
    info!(total_frames = frames.len(), "discovered frame sequence");

    // The background reference is decoded once and shared read-only by
    // every masking task. Default: the last enumerated frame.
    let background_path = match &config.background {
        Some(path) => path.clone(),
        None => frames[frames.len() - 1].source_path.clone(),
    };
    info!(path = %background_path.display(), "loading background reference");
    let background = tokio::task::spawn_blocking(move || decode_rgb(&background_path))
        .await
        .map_err(|e| WorkerError::task_join(e.to_string()))?
        .map_err(WorkerError::BackgroundLoad)?;

    let sequencer = ChunkSequencer::new(config, Arc::new(background));
    sequencer.run(frames, progress).await
}
