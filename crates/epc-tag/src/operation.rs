//! Tag operations
//!
//! The closed set of operations a reader can request against an inventoried
//! tag. Offsets and lengths are in 16-bit words; a password of 0 means "none
//! supplied".

use crate::{LockField, MemoryBank, Privilege};

/// Read a word range from a bank
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadOperation {
    /// Opaque id echoed in the result
    pub id: String,
    /// Bank to read
    pub bank: MemoryBank,
    /// First word to read
    pub word_offset: usize,
    /// Number of words; 0 reads to the end of the bank
    pub word_count: usize,
    /// Access password, 0 = none supplied
    pub password: u32,
}

/// Write data at a word offset into a bank
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteOperation {
    /// Opaque id echoed in the result
    pub id: String,
    /// Bank to write
    pub bank: MemoryBank,
    /// First word to overwrite
    pub word_offset: usize,
    /// Word-aligned payload (even byte count)
    pub data: Vec<u8>,
    /// Access password, 0 = none supplied
    pub password: u32,
}

/// Change the lock state of a field
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockOperation {
    /// Opaque id echoed in the result
    pub id: String,
    /// Field whose lock state changes
    pub field: LockField,
    /// Requested transition
    pub privilege: Privilege,
    /// Password, 0 = none supplied
    pub password: u32,
}

/// Permanently silence the tag
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KillOperation {
    /// Opaque id echoed in the result
    pub id: String,
    /// Kill password; 0 is rejected outright
    pub kill_password: u32,
}

/// Compound operation: ask the consumer callback for follow-up operations
///
/// Produces no result of its own; the expanded operations are dispatched in
/// its place and cannot themselves expand further.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestOperation {
    /// Opaque id (for logging; request operations yield no result)
    pub id: String,
}

/// Any operation against a single tag
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagOperation {
    /// Read a word range
    Read(ReadOperation),
    /// Write a word-aligned payload
    Write(WriteOperation),
    /// Change a field's lock state
    Lock(LockOperation),
    /// Kill the tag
    Kill(KillOperation),
    /// Expand via the consumer callback
    Request(RequestOperation),
}

impl TagOperation {
    /// The operation id
    pub fn id(&self) -> &str {
        match self {
            TagOperation::Read(op) => &op.id,
            TagOperation::Write(op) => &op.id,
            TagOperation::Lock(op) => &op.id,
            TagOperation::Kill(op) => &op.id,
            TagOperation::Request(op) => &op.id,
        }
    }

    /// Whether a successful run of this operation mutates the tag
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            TagOperation::Write(_) | TagOperation::Lock(_) | TagOperation::Kill(_)
        )
    }
}
