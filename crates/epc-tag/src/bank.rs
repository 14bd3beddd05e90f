//! Memory bank identifiers and PASSWORD bank layout

/// Bytes per 16-bit memory word
pub const WORD_BYTES: usize = 2;

/// Byte range of the kill password within the PASSWORD bank
pub const KILL_PASSWORD_BYTES: std::ops::Range<usize> = 0..4;

/// Byte range of the access password within the PASSWORD bank
pub const ACCESS_PASSWORD_BYTES: std::ops::Range<usize> = 4..8;

/// The four memory banks of an EPC Gen2 tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryBank {
    /// Reserved bank holding the kill and access passwords (bank 0)
    Password,
    /// EPC bank: CRC, PC word and the EPC itself (bank 1)
    Epc,
    /// TID bank: tag identification, never writable (bank 2)
    Tid,
    /// User bank: free-form application memory (bank 3)
    User,
}

impl MemoryBank {
    /// Returns a human-readable name for the bank
    pub fn name(&self) -> &'static str {
        match self {
            MemoryBank::Password => "PASSWORD",
            MemoryBank::Epc => "EPC",
            MemoryBank::Tid => "TID",
            MemoryBank::User => "USER",
        }
    }

    /// Air-interface bank index (0-3)
    pub fn index(&self) -> u8 {
        match self {
            MemoryBank::Password => 0,
            MemoryBank::Epc => 1,
            MemoryBank::Tid => 2,
            MemoryBank::User => 3,
        }
    }

    /// Resolve an air-interface bank index
    pub fn from_index(index: u8) -> Option<MemoryBank> {
        match index {
            0 => Some(MemoryBank::Password),
            1 => Some(MemoryBank::Epc),
            2 => Some(MemoryBank::Tid),
            3 => Some(MemoryBank::User),
            _ => None,
        }
    }
}
