//! Per-operation results
//!
//! Every operation kind reports through its own closed status enum; the
//! variants shared between kinds carry the same meaning everywhere. Failures
//! are payload data, not Rust errors.

/// Status codes for a read operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadStatus {
    /// Read succeeded; data is valid
    Success,
    /// Tag failed for no more specific reason
    NonSpecificTagError,
    /// Reader-side failure
    NonSpecificReaderError,
    /// Tag did not answer
    NoResponseFromTag,
    /// Requested range exceeds the bank
    MemoryOverrun,
    /// Range is locked and no usable password was supplied
    MemoryLocked,
    /// Supplied password does not match the stored one
    IncorrectPassword,
}

/// Status codes for a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WriteStatus {
    /// Write succeeded; words_written is valid
    Success,
    /// Tag failed for no more specific reason
    NonSpecificTagError,
    /// Reader-side failure
    NonSpecificReaderError,
    /// Tag did not answer
    NoResponseFromTag,
    /// Spliced data would exceed the bank's original length
    MemoryOverrun,
    /// Bank is locked (or TID, which never accepts writes)
    MemoryLocked,
    /// Supplied password does not match the stored one
    IncorrectPassword,
    /// Field strength too low to program the tag
    InsufficientPower,
}

/// Status codes for a lock operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockStatus {
    /// Lock state changed (or transition was a no-op)
    Success,
    /// Tag failed for no more specific reason
    NonSpecificTagError,
    /// Reader-side failure
    NonSpecificReaderError,
    /// Tag did not answer
    NoResponseFromTag,
    /// Mapped memory overrun from an earlier failed operation
    MemoryOverrun,
    /// Transition rejected (permanent state) or no usable password
    MemoryLocked,
    /// Supplied password does not match the stored one
    IncorrectPassword,
    /// Field strength too low to commit the lock
    InsufficientPower,
}

/// Status codes for a kill operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KillStatus {
    /// Tag is dead
    Success,
    /// Tag failed for no more specific reason
    NonSpecificTagError,
    /// Reader-side failure
    NonSpecificReaderError,
    /// Tag did not answer
    NoResponseFromTag,
    /// Supplied password does not match the stored kill password
    IncorrectPassword,
    /// Field strength too low to kill the tag
    InsufficientPower,
    /// A kill password of 0 is never accepted
    ZeroKillPassword,
}

/// Result of a read operation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadResult {
    /// Echo of the operation id
    pub operation_id: String,
    /// Bytes read; empty unless status is Success
    pub data: Vec<u8>,
    /// Outcome
    pub status: ReadStatus,
}

/// Result of a write operation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteResult {
    /// Echo of the operation id
    pub operation_id: String,
    /// Words actually written; 0 unless status is Success
    pub words_written: u16,
    /// Outcome
    pub status: WriteStatus,
}

/// Result of a lock operation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockResult {
    /// Echo of the operation id
    pub operation_id: String,
    /// Outcome
    pub status: LockStatus,
}

/// Result of a kill operation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KillResult {
    /// Echo of the operation id
    pub operation_id: String,
    /// Outcome
    pub status: KillStatus,
}

/// Any per-operation result, in operation order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationResult {
    /// Result of a read
    Read(ReadResult),
    /// Result of a write
    Write(WriteResult),
    /// Result of a lock
    Lock(LockResult),
    /// Result of a kill
    Kill(KillResult),
}

impl OperationResult {
    /// The echoed operation id
    pub fn operation_id(&self) -> &str {
        match self {
            OperationResult::Read(r) => &r.operation_id,
            OperationResult::Write(r) => &r.operation_id,
            OperationResult::Lock(r) => &r.operation_id,
            OperationResult::Kill(r) => &r.operation_id,
        }
    }

    /// Whether the operation succeeded
    pub fn is_success(&self) -> bool {
        match self {
            OperationResult::Read(r) => r.status == ReadStatus::Success,
            OperationResult::Write(r) => r.status == WriteStatus::Success,
            OperationResult::Lock(r) => r.status == LockStatus::Success,
            OperationResult::Kill(r) => r.status == KillStatus::Success,
        }
    }
}
