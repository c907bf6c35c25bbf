//! Shared data types for the motion-mask pipeline.
//!
//! This crate holds the plain-data vocabulary used across the workspace:
//! frame identity, chunk arithmetic, and progress/summary reporting.
//! It deliberately has no imaging dependencies.

pub mod frame;
pub mod progress;

pub use frame::{chunk_bounds, chunk_count, Frame};
pub use progress::{FailedFrame, PipelineProgress, PipelineSummary, ProgressCallback};
