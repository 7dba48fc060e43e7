//! Error types for the vault and export layers
//!
//! The projection engine itself never fails: invalid numeric input produces
//! an empty result instead of an error.

use crate::vault::RecordId;
use thiserror::Error;

/// Failures of the underlying key-value storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage quota exceeded: {attempted} bytes requested, limit is {limit}")]
    QuotaExceeded { limit: usize, attempted: usize },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A vault record that does not satisfy the fixed schema
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("record {0} has an empty title")]
    EmptyTitle(RecordId),

    #[error("record {id} field `{field}` is not a finite number")]
    NonFinite { id: RecordId, field: &'static str },

    #[error("record {id} field `{field}` is negative")]
    Negative { id: RecordId, field: &'static str },

    #[error("record {id} series `{series}` has {actual} points, expected {expected}")]
    SeriesLength {
        id: RecordId,
        series: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("a record with id {0} already exists")]
    DuplicateId(RecordId),

    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("series length mismatch: {0}")]
    Mismatch(String),
}

pub type VaultResult<T> = std::result::Result<T, VaultError>;
