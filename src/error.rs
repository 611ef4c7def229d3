//! Error taxonomy for collection construction and record batches.
//!
//! Errors raised by caller-supplied callbacks are never wrapped: a panicking
//! mapper unwinds straight through the collection, and record-store errors
//! returned from [`Record`](crate::models::Record) methods travel back through
//! the batch layer as the same [`anyhow::Error`] they started as.

use crate::key::Key;
use thiserror::Error;

/// Convenience result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Failures raised by the collection itself.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The given source cannot be normalized into a cursor.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An element lacks a capability the operation requires.
    #[error("invalid value at key {key}: expected {expected}, found {found}")]
    InvalidValue {
        key: Key,
        expected: String,
        found: String,
    },

    /// The operation needs context the collection was not created with.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON encoding of the materialized data failed.
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollectionError {
    pub fn invalid_input<T: Into<String>>(message: T) -> Self {
        CollectionError::InvalidInput(message.into())
    }

    pub fn invalid_value(
        key: Key,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        CollectionError::InvalidValue {
            key,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn invalid_operation<T: Into<String>>(message: T) -> Self {
        CollectionError::InvalidOperation(message.into())
    }
}
