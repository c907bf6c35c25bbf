//! Chunked, order-preserving mask/delta sequencing.
//!
//! Frames are admitted in chunks of at most `chunk_size`. Masking inside a
//! chunk runs concurrently on blocking threads and completes in arbitrary
//! order; a hard `join_all` barrier drains the chunk, outcomes are sorted
//! back into frame order, and delta images are emitted strictly ascending.
//! The last valid mask of each chunk is carried into the next one as the
//! seam, so the delta chain is unbroken across chunk boundaries while peak
//! residency stays bounded by one chunk of decoded masks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use image::{GrayImage, RgbImage};
use tracing::{debug, info, warn};

use roto_media::{compose_delta, compute_mask, decode_rgb, encode_gray, soften};
use roto_media::{FrameMask, MaskError, MaskResult};
use roto_models::{FailedFrame, Frame, PipelineProgress, PipelineSummary, ProgressCallback};

use crate::config::PipelineConfig;
use crate::error::{WorkerError, WorkerResult};

/// Per-frame masking outcome.
///
/// Failures travel through sequencing as tagged results; they can never be
/// mistaken for a valid (sortable) frame index.
struct MaskOutcome {
    frame: Frame,
    result: MaskResult<GrayImage>,
}

/// Orchestrates the per-chunk accumulate/drain/sequence/emit loop.
pub struct ChunkSequencer {
    background: Arc<RgbImage>,
    output_dir: PathBuf,
    threshold_sq: f32,
    chunk_size: usize,
    blur_iterations: u32,
}

impl ChunkSequencer {
    pub fn new(config: &PipelineConfig, background: Arc<RgbImage>) -> Self {
        Self {
            background,
            output_dir: config.output_dir.clone(),
            threshold_sq: config.threshold_sq,
            chunk_size: config.chunk_size,
            blur_iterations: config.blur_iterations,
        }
    }

    /// Process every frame and return the run summary.
    ///
    /// The driving task blocks only at the two per-chunk barriers: the
    /// mask drain and the delta emit.
    pub async fn run(
        &self,
        frames: Vec<Frame>,
        progress: Option<ProgressCallback>,
    ) -> WorkerResult<PipelineSummary> {
        let total_frames = frames.len() as u64;
        let mut summary = PipelineSummary {
            total_frames,
            ..Default::default()
        };

        let started = Instant::now();
        let mut frames_done: u64 = 0;
        let mut seam: Option<Arc<FrameMask>> = None;

        for chunk in frames.chunks(self.chunk_size) {
            let chunk_started = Instant::now();

            // Accumulating: launch one blocking mask task per frame, at
            // most chunk_size in flight.
            let handles: Vec<_> = chunk
                .iter()
                .cloned()
                .map(|frame| {
                    let background = Arc::clone(&self.background);
                    let threshold_sq = self.threshold_sq;
                    let blur_iterations = self.blur_iterations;
                    tokio::task::spawn_blocking(move || {
                        mask_frame(frame, &background, threshold_sq, blur_iterations)
                    })
                })
                .collect();

            // Draining: hard barrier. Completion order is unspecified and
            // must be normalized before any delta work.
            let mut outcomes = Vec::with_capacity(handles.len());
            for joined in join_all(handles).await {
                outcomes.push(joined.map_err(|e| WorkerError::task_join(e.to_string()))?);
            }

            // Sequencing: restore frame order.
            outcomes.sort_by_key(|o| o.frame.index);

            // Emitting: walk in order, pairing each valid mask with the
            // nearest valid predecessor (seeded from the seam).
            let mut delta_handles = Vec::new();
            let mut prev = seam.take();
            for outcome in outcomes {
                match outcome.result {
                    Ok(mask) => {
                        let current = Arc::new(FrameMask::new(outcome.frame, mask));
                        if let Some(prev_mask) = &prev {
                            delta_handles.push(self.spawn_delta(prev_mask, &current));
                        }
                        prev = Some(current);
                    }
                    Err(e) => {
                        warn!(
                            index = outcome.frame.index,
                            path = %outcome.frame.source_path.display(),
                            error = %e,
                            "skipping frame: mask failed"
                        );
                        summary.failed_frames.push(FailedFrame {
                            index: outcome.frame.index,
                            source_path: outcome.frame.source_path,
                            reason: e.to_string(),
                        });
                    }
                }

                frames_done += 1;
                if let Some(callback) = &progress {
                    callback(PipelineProgress {
                        frames_done,
                        total_frames,
                        avg_millis_per_frame: started.elapsed().as_millis() as f64
                            / frames_done as f64,
                    });
                }
            }

            // Second barrier: the chunk is finished only once every delta
            // in it is on disk.
            for joined in join_all(delta_handles).await {
                let (index, result) = joined.map_err(|e| WorkerError::task_join(e.to_string()))?;
                match result {
                    Ok(path) => {
                        summary.deltas_written += 1;
                        debug!(index, path = %path.display(), "delta written");
                    }
                    Err(e) => {
                        warn!(index, error = %e, "delta emission failed");
                        summary.failed_frames.push(FailedFrame {
                            index,
                            source_path: PathBuf::new(),
                            reason: e.to_string(),
                        });
                    }
                }
            }

            seam = prev;
            roto_media::metrics::record_chunk(chunk_started.elapsed().as_secs_f64());
        }

        info!(
            total_frames,
            deltas_written = summary.deltas_written,
            failed = summary.error_count(),
            "sequencing complete"
        );
        Ok(summary)
    }

    /// Launch a blocking compose+encode task for one ordered mask pair.
    fn spawn_delta(
        &self,
        prev: &Arc<FrameMask>,
        curr: &Arc<FrameMask>,
    ) -> tokio::task::JoinHandle<(u64, MaskResult<PathBuf>)> {
        let prev = Arc::clone(prev);
        let curr = Arc::clone(curr);
        let out_path = self.output_dir.join(
            curr.frame
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("frame.png")),
        );
        tokio::task::spawn_blocking(move || {
            let index = curr.frame.index;
            let result = compose_delta(&prev.mask, &curr.mask)
                .and_then(|delta| encode_gray(&delta, &out_path))
                .map(|()| {
                    roto_media::metrics::record_delta_written();
                    out_path
                });
            (index, result)
        })
    }
}

/// Decode, dimension-check, mask, and soften one frame.
fn mask_frame(
    frame: Frame,
    background: &RgbImage,
    threshold_sq: f32,
    blur_iterations: u32,
) -> MaskOutcome {
    let started = Instant::now();
    let result: MaskResult<GrayImage> = (|| {
        let img = decode_rgb(&frame.source_path)?;
        if img.dimensions() != background.dimensions() {
            return Err(MaskError::dimension_mismatch(
                frame.source_path.clone(),
                background.dimensions(),
                img.dimensions(),
            ));
        }
        let mask = compute_mask(&img, background, threshold_sq)?;
        Ok(soften(mask, blur_iterations))
    })();

    match &result {
        Ok(_) => roto_media::metrics::record_frame_masked(started.elapsed().as_secs_f64()),
        Err(_) => roto_media::metrics::record_frame_failed(),
    }
    MaskOutcome { frame, result }
}
