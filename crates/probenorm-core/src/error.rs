//! Error types for record extraction and batch processing.

use crate::types::TestKind;

/// Why a single probe record could not be turned into results.
///
/// These are per-record failures: the batch driver drops the record and
/// moves on unless strict mode is enabled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("{tag} record has {len} fields, field {index} ({field}) is missing")]
    MissingField {
        tag: &'static str,
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{tag} field {index} ({field}) is not a valid number: {raw:?}")]
    InvalidNumber {
        tag: &'static str,
        field: &'static str,
        index: usize,
        raw: String,
    },

    #[error("timestamp {0} ms is out of range")]
    TimestampOutOfRange(i64),

    #[error("{kind} value {value} is not finite")]
    NonFiniteValue { kind: TestKind, value: f64 },
}

/// A strict-mode batch failure: the first record that could not be extracted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("record {index}: {source}")]
pub struct BatchError {
    pub index: usize,
    #[source]
    pub source: RecordError,
}
