use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the expense store and its backing file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Position {position} is out of range (1-{len})")]
    OutOfRange { position: usize, len: usize },
    #[error("Failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Failed to serialize expenses: {0}")]
    Serialize(#[from] serde_json::Error),
}
