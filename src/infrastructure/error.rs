use crate::domain::models::BlockId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid time '{0}': must be HH:MM")]
    Format(String),
    #[error("Wake and sleep times leave no schedulable minutes")]
    EmptyWindow,
    #[error("Day window has not been configured")]
    WindowNotSet,
    #[error("Time must be within the wake/sleep schedule")]
    OutOfSchedule,
    #[error("Overlap with block {0}")]
    Overlaps(BlockId),
    #[error("Invalid block: {0}")]
    InvalidBlock(String),
    #[error("Unknown block {0}")]
    UnknownBlock(BlockId),
    #[error("Invalid import: {0}")]
    InvalidImport(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
