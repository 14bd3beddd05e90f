//! Error types for the store boundary

use thiserror::Error;

/// Errors that can occur at the store boundary
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No session with this id exists
    #[error("unknown session: {0}")]
    UnknownSession(String),
}
