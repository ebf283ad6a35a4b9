//! Error types for the sync record codec.

use crate::RecordKind;
use thiserror::Error;

/// All possible errors from decoding a sync record.
///
/// Encoding is total and has no error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A field is present but carries the wrong wire type.
    #[error("malformed field '{field}': expected {expected}, got {got}")]
    Malformed {
        field: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("unknown record kind: {0}")]
    UnknownKind(String),

    #[error("no record variant for kind: {0}")]
    UnsupportedKind(RecordKind),

    #[error("payload carries no record kind discriminator")]
    MissingKind,
}

impl DecodeError {
    pub(crate) fn malformed(
        field: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        DecodeError::Malformed {
            field: field.into(),
            expected,
            got,
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
