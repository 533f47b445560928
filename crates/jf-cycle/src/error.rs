//! Error types for cycle solving.

use crate::label::StateLabel;
use jf_core::JfError;
use thiserror::Error;

/// Errors that can occur while configuring or solving a cycle.
///
/// Regeneration infeasibility and degenerate floating-point results are not
/// errors; they show up in the returned outcome and the state values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("{operation} requires state {required} to be computed first")]
    MissingPrerequisite {
        operation: &'static str,
        required: StateLabel,
    },

    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: &'static str },
}

pub type CycleResult<T> = Result<T, CycleError>;

impl From<CycleError> for JfError {
    fn from(e: CycleError) -> Self {
        match e {
            CycleError::MissingPrerequisite {
                operation,
                required,
            } => JfError::MissingPrerequisite {
                what: format!("{operation} needs state {required}"),
            },
            CycleError::InvalidParameter { what } => JfError::InvalidArg {
                what: what.to_string(),
            },
        }
    }
}
