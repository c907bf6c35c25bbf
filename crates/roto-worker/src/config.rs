//! Pipeline configuration.
//!
//! CLI arguments are parsed once into a validated [`PipelineConfig`] which
//! downstream stages use without re-parsing flags. Every option also has a
//! `ROTO_*` environment fallback.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{WorkerError, WorkerResult};

/// CLI arguments for the pipeline driver.
#[derive(Debug, Parser)]
#[command(
    name = "roto-worker",
    about = "Compute foreground masks for a frame sequence and emit frame-to-frame delta images"
)]
pub struct PipelineArgs {
    /// Folder containing the video frame images.
    #[arg(short = 'i', long, env = "ROTO_INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output folder for delta images. Must already exist.
    #[arg(short = 'o', long, env = "ROTO_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Background-similarity threshold; lower values are noisier.
    #[arg(long, default_value_t = 48.0, env = "ROTO_BG_THRESHOLD")]
    pub bg_threshold: f32,

    /// Number of frames masked in parallel per chunk (memory/parallelism knob).
    #[arg(short = 'p', long, default_value_t = 128, env = "ROTO_CHUNK_SIZE")]
    pub chunk_size: usize,

    /// Number of blur iterations applied to each mask.
    #[arg(short = 'b', long, default_value_t = 3, env = "ROTO_BLUR_ITERATIONS")]
    pub blur_iterations: u32,

    /// Explicit background reference image. Defaults to the last frame
    /// in the input folder.
    #[arg(long, env = "ROTO_BACKGROUND")]
    pub background: Option<PathBuf>,

    /// Skip clearing the output folder before processing.
    #[arg(long, env = "ROTO_KEEP_OUTPUT")]
    pub keep_output: bool,

    /// Recognized frame file extensions.
    #[arg(long, value_delimiter = ',', default_value = "jpg,jpeg,png")]
    pub extensions: Vec<String>,
}

/// Validated configuration shared by every stage of the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Squared threshold; masking compares squared distances.
    pub threshold_sq: f32,
    pub chunk_size: usize,
    pub blur_iterations: u32,
    pub background: Option<PathBuf>,
    pub keep_output: bool,
    pub extensions: Vec<String>,
}

impl PipelineArgs {
    /// Validate arguments into a [`PipelineConfig`].
    ///
    /// Missing directories and out-of-range knobs are fatal; nothing is
    /// processed past this point on failure.
    pub fn validate(self) -> WorkerResult<PipelineConfig> {
        if !self.input_dir.is_dir() {
            return Err(WorkerError::config(format!(
                "input folder does not exist: {}",
                self.input_dir.display()
            )));
        }
        if !self.output_dir.is_dir() {
            return Err(WorkerError::config(format!(
                "output folder must exist: {}",
                self.output_dir.display()
            )));
        }
        if self.chunk_size < 1 {
            return Err(WorkerError::config("chunk size must be at least 1"));
        }
        if !self.bg_threshold.is_finite() || self.bg_threshold < 0.0 {
            return Err(WorkerError::config(format!(
                "background threshold must be a non-negative number, got {}",
                self.bg_threshold
            )));
        }
        if let Some(bg) = &self.background {
            if !bg.is_file() {
                return Err(WorkerError::config(format!(
                    "background image does not exist: {}",
                    bg.display()
                )));
            }
        }
        if self.extensions.is_empty() {
            return Err(WorkerError::config("at least one frame extension is required"));
        }

        Ok(PipelineConfig {
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            threshold_sq: self.bg_threshold * self.bg_threshold,
            chunk_size: self.chunk_size,
            blur_iterations: self.blur_iterations,
            background: self.background,
            keep_output: self.keep_output,
            extensions: self
                .extensions
                .into_iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
        })
    }
}
