use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<tempfile::PersistError> for AppError {
    fn from(err: tempfile::PersistError) -> Self {
        AppError::Io(err.error)
    }
}

/// Why a stored record could not be turned back into a domain object.
///
/// Never surfaced to repository callers: the offending record is logged and
/// skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` has the wrong type, expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` is not a YYYY-MM-DD date: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("record is a {found}, expected a {expected}")]
    VariantMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
