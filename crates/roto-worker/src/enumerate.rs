//! Frame discovery and output-folder cleanup.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use roto_models::Frame;

use crate::error::WorkerResult;

/// Discover frames in `dir`, filtered to the recognized `extensions`
/// (lowercase, without the dot).
///
/// Entries are sorted by file name so enumeration order is stable across
/// runs and platforms; indices are assigned contiguously from 0 in that
/// order.
pub async fn discover_frames(dir: &Path, extensions: &[String]) -> WorkerResult<Vec<Frame>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let path = entry.path();
        let recognized = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|known| known == &e.to_ascii_lowercase()))
            .unwrap_or(false);
        if recognized {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-frame file");
        }
    }

    paths.sort();
    Ok(paths
        .into_iter()
        .enumerate()
        .map(|(index, path)| Frame::new(index as u64, path))
        .collect())
}

/// Remove regular files from the output folder before a run.
///
/// Subdirectories are left alone. Returns the number of files removed.
pub async fn clear_output_dir(dir: &Path) -> WorkerResult<usize> {
    let mut removed = 0;
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            warn!(path = %entry.path().display(), "leaving non-file entry in output folder");
            continue;
        }
        tokio::fs::remove_file(entry.path()).await?;
        removed += 1;
    }
    debug!(removed, dir = %dir.display(), "cleared output folder");
    Ok(removed)
}
