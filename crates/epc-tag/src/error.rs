//! Tag-level error taxonomy and per-kind result mapping
//!
//! Once any operation on a tag fails, the dispatcher pins a [`TagError`] to
//! the tag and later operations in the same round are answered from it
//! instead of being executed. Each operation kind maps the taxonomy into its
//! own status enum; combinations without a kind-specific code fall back to
//! that kind's non-specific tag error.

use thiserror::Error;

use crate::{KillStatus, LockStatus, ReadStatus, WriteStatus};

/// Generic reasons a tag-level operation failed
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TagError {
    /// Tag failed for no more specific reason
    #[error("non-specific tag error")]
    NonSpecificTag,

    /// Reader-side failure
    #[error("non-specific reader error")]
    NonSpecificReader,

    /// Tag did not answer
    #[error("no response from tag")]
    NoResponseFromTag,

    /// Access exceeded the addressed bank
    #[error("memory overrun")]
    MemoryOverrun,

    /// Target memory is locked
    #[error("memory locked")]
    MemoryLocked,

    /// Password mismatch
    #[error("incorrect password")]
    IncorrectPassword,

    /// Field strength too low
    #[error("insufficient power")]
    InsufficientPower,

    /// Kill password of 0 rejected
    #[error("zero kill password")]
    ZeroKillPassword,
}

impl From<TagError> for ReadStatus {
    fn from(err: TagError) -> ReadStatus {
        match err {
            TagError::NonSpecificTag => ReadStatus::NonSpecificTagError,
            TagError::NonSpecificReader => ReadStatus::NonSpecificReaderError,
            TagError::NoResponseFromTag => ReadStatus::NoResponseFromTag,
            TagError::MemoryOverrun => ReadStatus::MemoryOverrun,
            TagError::MemoryLocked => ReadStatus::MemoryLocked,
            TagError::IncorrectPassword => ReadStatus::IncorrectPassword,
            // reads have no power or kill-password codes
            TagError::InsufficientPower | TagError::ZeroKillPassword => {
                ReadStatus::NonSpecificTagError
            }
        }
    }
}

impl From<TagError> for WriteStatus {
    fn from(err: TagError) -> WriteStatus {
        match err {
            TagError::NonSpecificTag => WriteStatus::NonSpecificTagError,
            TagError::NonSpecificReader => WriteStatus::NonSpecificReaderError,
            TagError::NoResponseFromTag => WriteStatus::NoResponseFromTag,
            TagError::MemoryOverrun => WriteStatus::MemoryOverrun,
            TagError::MemoryLocked => WriteStatus::MemoryLocked,
            TagError::IncorrectPassword => WriteStatus::IncorrectPassword,
            TagError::InsufficientPower => WriteStatus::InsufficientPower,
            TagError::ZeroKillPassword => WriteStatus::NonSpecificTagError,
        }
    }
}

impl From<TagError> for LockStatus {
    fn from(err: TagError) -> LockStatus {
        match err {
            TagError::NonSpecificTag => LockStatus::NonSpecificTagError,
            TagError::NonSpecificReader => LockStatus::NonSpecificReaderError,
            TagError::NoResponseFromTag => LockStatus::NoResponseFromTag,
            TagError::MemoryOverrun => LockStatus::MemoryOverrun,
            TagError::MemoryLocked => LockStatus::MemoryLocked,
            TagError::IncorrectPassword => LockStatus::IncorrectPassword,
            TagError::InsufficientPower => LockStatus::InsufficientPower,
            TagError::ZeroKillPassword => LockStatus::NonSpecificTagError,
        }
    }
}

impl From<TagError> for KillStatus {
    fn from(err: TagError) -> KillStatus {
        match err {
            TagError::NonSpecificTag => KillStatus::NonSpecificTagError,
            TagError::NonSpecificReader => KillStatus::NonSpecificReaderError,
            TagError::NoResponseFromTag => KillStatus::NoResponseFromTag,
            TagError::IncorrectPassword => KillStatus::IncorrectPassword,
            TagError::InsufficientPower => KillStatus::InsufficientPower,
            TagError::ZeroKillPassword => KillStatus::ZeroKillPassword,
            // kills have no memory-addressing codes
            TagError::MemoryOverrun | TagError::MemoryLocked => KillStatus::NonSpecificTagError,
        }
    }
}
