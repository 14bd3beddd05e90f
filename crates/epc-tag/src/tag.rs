//! Simulated tag state
//!
//! A [`Tag`] is the owned, single-writer record of one simulated transponder.
//! The access layer mutates it in place; persistence happens explicitly
//! afterwards, never through aliasing.

use std::collections::HashMap;

use crate::bank::{ACCESS_PASSWORD_BYTES, KILL_PASSWORD_BYTES};
use crate::{LockField, LockState, MemoryBank};

/// One simulated EPC Gen2 tag
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    /// Opaque tag identity assigned by whoever populated the store
    pub id: String,
    /// Bank contents; an absent entry behaves like an empty bank
    pub memory_banks: HashMap<MemoryBank, Vec<u8>>,
    /// Peak RSSI per antenna id, populated at inventory time
    pub antennas: HashMap<u16, i16>,
    /// Lock state per field; absence means the field was never locked
    pub locks: HashMap<LockField, LockState>,
    /// Monotonic: once killed the tag never answers an inventory again
    pub killed: bool,
}

impl Tag {
    /// Create an empty tag with the given identity
    pub fn new(id: impl Into<String>) -> Self {
        Tag {
            id: id.into(),
            ..Tag::default()
        }
    }

    /// Get a bank's contents, if the bank has ever been written
    pub fn bank(&self, bank: MemoryBank) -> Option<&[u8]> {
        self.memory_banks.get(&bank).map(Vec::as_slice)
    }

    /// Replace a bank's contents
    pub fn set_bank(&mut self, bank: MemoryBank, data: Vec<u8>) {
        self.memory_banks.insert(bank, data);
    }

    /// Record an antenna observation (peak RSSI)
    pub fn observe(&mut self, antenna_id: u16, peak_rssi: i16) {
        self.antennas.insert(antenna_id, peak_rssi);
    }

    /// Lock state of a field, if an entry exists
    pub fn lock_state(&self, field: LockField) -> Option<LockState> {
        self.locks.get(&field).copied()
    }

    /// The stored access password (PASSWORD bank bytes 4-7)
    ///
    /// An absent, short or otherwise malformed field reads as 0, i.e. "no
    /// password set".
    pub fn access_password(&self) -> u32 {
        let data = self.bank(MemoryBank::Password).unwrap_or(&[]);
        crate::bits::be_u32(data, ACCESS_PASSWORD_BYTES)
    }

    /// The stored kill password (PASSWORD bank bytes 0-3), 0 when unset
    pub fn kill_password(&self) -> u32 {
        let data = self.bank(MemoryBank::Password).unwrap_or(&[]);
        crate::bits::be_u32(data, KILL_PASSWORD_BYTES)
    }
}
