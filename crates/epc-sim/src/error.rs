//! Error types for the simulation engine

use thiserror::Error;

/// Errors that can occur while driving the simulated reader
#[derive(Debug, Error)]
pub enum SimError {
    /// Reader used before connect() or after disconnect()
    #[error("reader not connected")]
    NotConnected,

    /// No region configured
    #[error("no region has been set")]
    NoRegion,

    /// Store boundary failure
    #[error("store error: {0}")]
    Store(#[from] epc_store::StoreError),
}
