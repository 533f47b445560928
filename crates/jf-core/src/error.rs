use thiserror::Error;

pub type JfResult<T> = Result<T, JfError>;

#[derive(Error, Debug)]
pub enum JfError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Missing prerequisite: {what}")]
    MissingPrerequisite { what: String },

    #[error("Unknown key: {key}")]
    UnknownKey { key: String },
}
