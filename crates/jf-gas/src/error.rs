//! Gas property errors.

use jf_core::JfError;
use thiserror::Error;

/// Result type for gas property lookups.
pub type GasResult<T> = Result<T, GasError>;

/// Errors that can occur when resolving gas property data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// Lookup of an unregistered gas key.
    #[error("Unknown gas species: '{key}'")]
    UnknownSpecies { key: String },
}

impl From<GasError> for JfError {
    fn from(err: GasError) -> Self {
        match err {
            GasError::UnknownSpecies { key } => JfError::UnknownKey { key },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GasError::UnknownSpecies {
            key: "argon".into(),
        };
        assert!(err.to_string().contains("argon"));
    }

    #[test]
    fn error_to_jf_error() {
        let gas_err = GasError::UnknownSpecies { key: "xenon".into() };
        let jf_err: JfError = gas_err.into();
        assert!(matches!(jf_err, JfError::UnknownKey { .. }));
    }
}
