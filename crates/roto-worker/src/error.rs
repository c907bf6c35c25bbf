//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Background load failed: {0}")]
    BackgroundLoad(#[source] roto_media::MaskError),

    #[error("Task join error: {0}")]
    TaskJoin(String),

    #[error("Media error: {0}")]
    Media(#[from] roto_media::MaskError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn task_join(msg: impl Into<String>) -> Self {
        Self::TaskJoin(msg.into())
    }
}
