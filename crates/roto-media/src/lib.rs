//! Imaging core for the motion-mask pipeline.
//!
//! This crate provides:
//! - Foreground masking against a shared background reference
//! - Resize-based blur approximation for mask smoothing
//! - Frame-to-frame delta composition
//! - Thin decode/encode wrappers with typed errors

pub mod blur;
pub mod codec;
pub mod delta;
pub mod error;
pub mod masker;
pub mod metrics;

pub use blur::soften;
pub use codec::{decode_rgb, encode_gray};
pub use delta::{compose_delta, FrameMask};
pub use error::{MaskError, MaskResult};
pub use masker::compute_mask;
