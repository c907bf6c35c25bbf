//! Pipeline progress reporting.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Progress information for a running pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PipelineProgress {
    /// Frames fully processed so far (monotonic).
    pub frames_done: u64,
    /// Total frames discovered for this run.
    pub total_frames: u64,
    /// Average wall-clock milliseconds spent per frame so far.
    pub avg_millis_per_frame: f64,
}

impl PipelineProgress {
    /// Completion percentage in `[0, 100]`.
    ///
    /// Guards empty inputs: a run with no frames reports 100% rather than
    /// dividing by zero.
    pub fn percentage(&self) -> f64 {
        if self.total_frames == 0 {
            return 100.0;
        }
        ((self.frames_done as f64 / self.total_frames as f64) * 100.0).min(100.0)
    }
}

/// Callback type for progress updates.
pub type ProgressCallback = Box<dyn Fn(PipelineProgress) + Send + Sync + 'static>;

/// Final report for a completed run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Frames discovered in the input directory.
    pub total_frames: u64,
    /// Delta images written to the output directory.
    pub deltas_written: u64,
    /// Frames whose mask could not be computed, with the failure message.
    pub failed_frames: Vec<FailedFrame>,
}

/// A frame excluded from the delta chain, and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFrame {
    pub index: u64,
    pub source_path: PathBuf,
    pub reason: String,
}

impl PipelineSummary {
    /// Number of frames that failed masking.
    pub fn error_count(&self) -> usize {
        self.failed_frames.len()
    }
}
