use thiserror::Error;

use crate::models::timetable::SlotConflict;

#[derive(Error, Debug)]
pub enum SchoolError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed: {}", .0.join("; "))]
    InvalidRequest(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Slot conflict detected")]
    SlotConflict(Vec<SlotConflict>),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type SchoolResult<T> = Result<T, SchoolError>;
