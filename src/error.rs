//! Error types for storage and form handling

use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("storage quota exceeded writing {key:?}")]
    QuotaExceeded { key: String },

    #[error("malformed data under {key:?}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize records: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a form submission is rejected; none of them change any state
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("please fill in the {0} field")]
    MissingField(&'static str),

    #[error("unknown property type {0:?}")]
    UnknownType(String),

    #[error("unknown status {0:?}")]
    UnknownStatus(String),

    #[error("rent must be a non-negative number, got {0:?}")]
    InvalidRent(String),

    #[error("no property ids left")]
    IdsExhausted,
}
