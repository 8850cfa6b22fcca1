//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

/// Application errors: everything that can go wrong around the pure counter.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("plan not found: {0}")]
    PlanNotFound(PathBuf),

    #[error("not inside a git repository: {0}")]
    NotInRepository(PathBuf),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
