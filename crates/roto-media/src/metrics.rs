//! Pipeline metrics.
//!
//! Emits through the `metrics` facade; a recorder is installed (or not)
//! by the embedding binary.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_MASKED_TOTAL: &str = "roto_frames_masked_total";
    pub const FRAMES_FAILED_TOTAL: &str = "roto_frames_failed_total";
    pub const DELTAS_WRITTEN_TOTAL: &str = "roto_deltas_written_total";
    pub const MASK_DURATION_SECONDS: &str = "roto_mask_duration_seconds";
    pub const CHUNK_DURATION_SECONDS: &str = "roto_chunk_duration_seconds";
}

/// Record a successfully masked frame.
pub fn record_frame_masked(duration_secs: f64) {
    counter!(names::FRAMES_MASKED_TOTAL).increment(1);
    histogram!(names::MASK_DURATION_SECONDS).record(duration_secs);
}

/// Record a frame whose mask could not be computed.
pub fn record_frame_failed() {
    counter!(names::FRAMES_FAILED_TOTAL).increment(1);
}

/// Record a delta image written to disk.
pub fn record_delta_written() {
    counter!(names::DELTAS_WRITTEN_TOTAL).increment(1);
}

/// Record a completed chunk (drain through emit).
pub fn record_chunk(duration_secs: f64) {
    histogram!(names::CHUNK_DURATION_SECONDS).record(duration_secs);
}
