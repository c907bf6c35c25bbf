//! Frame identity and chunk arithmetic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One input image in the ordered sequence.
///
/// Indices are assigned by discovery order, are contiguous starting at 0,
/// and never change once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Position in the enumeration order (0-based, contiguous).
    pub index: u64,
    /// Path the frame was discovered at.
    pub source_path: PathBuf,
}

impl Frame {
    pub fn new(index: u64, source_path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            source_path: source_path.into(),
        }
    }

    /// File name component of the source path, used to derive output names.
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.source_path.file_name()
    }
}

/// Number of chunks needed to cover `total` frames at `chunk_size` per chunk.
///
/// The final chunk may be shorter than `chunk_size`.
pub fn chunk_count(total: usize, chunk_size: usize) -> usize {
    assert!(chunk_size >= 1, "chunk size must be at least 1");
    total.div_ceil(chunk_size)
}

/// Inclusive index bounds `(start, end)` of chunk `chunk_idx`.
///
/// Returns `None` when the chunk lies past the end of the sequence.
pub fn chunk_bounds(total: usize, chunk_size: usize, chunk_idx: usize) -> Option<(u64, u64)> {
    assert!(chunk_size >= 1, "chunk size must be at least 1");
    let start = chunk_idx.checked_mul(chunk_size)?;
    if start >= total {
        return None;
    }
    let end = (start + chunk_size).min(total) - 1;
    Some((start as u64, end as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_count() {
        assert_eq!(chunk_count(0, 128), 0);
        assert_eq!(chunk_count(5, 2), 3);
        assert_eq!(chunk_count(4, 2), 2);
        assert_eq!(chunk_count(1, 128), 1);
        assert_eq!(chunk_count(128, 128), 1);
        assert_eq!(chunk_count(129, 128), 2);
    }

    #[test]
    fn test_chunk_bounds() {
        // 5 frames, chunk size 2 -> chunks (0,1), (2,3), (4,4)
        assert_eq!(chunk_bounds(5, 2, 0), Some((0, 1)));
        assert_eq!(chunk_bounds(5, 2, 1), Some((2, 3)));
        assert_eq!(chunk_bounds(5, 2, 2), Some((4, 4)));
        assert_eq!(chunk_bounds(5, 2, 3), None);
    }

    #[test]
    fn test_frame_file_name() {
        let frame = Frame::new(7, "/frames/frame_0007.jpg");
        assert_eq!(frame.file_name().unwrap(), "frame_0007.jpg");
    }
}
