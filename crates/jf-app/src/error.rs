//! Error types for the jf-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Case error: {0}")]
    Project(String),

    #[error("Case compilation failed: {0}")]
    Compile(String),

    #[error("Cycle error: {0}")]
    Cycle(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to write report: {path}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for jf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<jf_project::ProjectError> for AppError {
    fn from(err: jf_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<jf_cycle::CycleError> for AppError {
    fn from(err: jf_cycle::CycleError) -> Self {
        AppError::Cycle(err.to_string())
    }
}

impl From<jf_gas::GasError> for AppError {
    fn from(err: jf_gas::GasError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
