//! Error types for ABA file generation.

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, AbaError>;

/// Errors that can occur while building an ABA file.
///
/// Validation errors are raised synchronously from the call that detected
/// them, before any totals or document state has been touched; callers see
/// them verbatim and there is no internal retry or partial-failure mode.
#[derive(Error, Debug)]
pub enum AbaError {
    /// One or more required fields absent from an input record; lists every
    /// missing name, not just the first
    #[error("missing required {record_type} record fields: {}", .fields.join(", "))]
    MissingFields {
        record_type: &'static str,
        fields: Vec<&'static str>,
    },

    /// Field present but its value fails the field's charset/length rule
    #[error("invalid {field}: {rule}")]
    InvalidFormat {
        field: &'static str,
        rule: &'static str,
    },

    /// Transaction code outside the direct-entry whitelist
    #[error("invalid transaction code {0:?}")]
    InvalidTransactionCode(String),

    /// Process date missing, mis-formatted, or not a real calendar date
    #[error("invalid process date {0:?}: must be a real calendar date in DDMMYY form")]
    InvalidDate(String),

    /// Amount or withholding tax not interpretable as a currency amount
    #[error("{field} {value:?} is not a non-negative currency amount")]
    NotNumeric {
        field: &'static str,
        value: String,
    },

    /// A detail or total record was requested before the descriptive record
    /// was set
    #[error("no descriptive record set; call set_descriptive_record first")]
    MissingDescriptiveRecord,

    /// The descriptive record is set once per file and is immutable afterwards
    #[error("descriptive record already set; use a new generator for another file")]
    DescriptiveRecordAlreadySet,

    /// CSV parsing error from the transaction ingestion reader
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while writing the generated document to a sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
