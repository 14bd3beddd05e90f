//! Tag identity summary
//!
//! The inventory report identifies each tag by the contents of its EPC bank:
//! CRC word, protocol-control word, the EPC itself and, when the PC's XI bit
//! announces one, the XPC word. A tag with a missing or short EPC bank still
//! produces a summary with zeroed fields; identity extraction never fails.

use crate::bits;
use crate::{MemoryBank, Tag};

/// PC-word bit announcing an XPC word
const PC_XI_BIT: u16 = 0x200;

/// Word index of the XPC word within the EPC bank
const XPC_WORD: usize = 21;

/// Identity summary of one inventoried tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagSummary {
    /// Opaque tag identity from the store
    pub tag_id: String,
    /// Antenna the tag was reported on
    pub antenna_id: u16,
    /// Peak RSSI on that antenna
    pub rssi: i16,
    /// CRC word (EPC bank word 0)
    pub crc: u16,
    /// Protocol-control word (EPC bank word 1)
    pub pc: u16,
    /// The EPC (EPC bank bytes 4..)
    pub epc: Vec<u8>,
    /// XPC word, 0 unless the PC's XI bit is set and the bank holds it
    pub xpc: u16,
}

impl TagSummary {
    /// Extract the identity summary from a tag
    ///
    /// The antenna/RSSI pair is taken from the lowest-numbered observation so
    /// repeated extractions are deterministic.
    pub fn from_tag(tag: &Tag) -> TagSummary {
        let (antenna_id, rssi) = tag
            .antennas
            .iter()
            .min_by_key(|(id, _)| **id)
            .map(|(id, rssi)| (*id, *rssi))
            .unwrap_or((0, 0));

        let epc_bank = tag.bank(MemoryBank::Epc).unwrap_or(&[]);
        let crc = bits::be_word(epc_bank, 0);
        let pc = bits::be_word(epc_bank, 1);
        let epc = epc_bank.get(4..).unwrap_or(&[]).to_vec();

        let xpc = if pc & PC_XI_BIT != 0 && epc_bank.len() >= (XPC_WORD + 1) * 2 {
            bits::be_word(epc_bank, XPC_WORD)
        } else {
            0
        };

        TagSummary {
            tag_id: tag.id.clone(),
            antenna_id,
            rssi,
            crc,
            pc,
            epc,
            xpc,
        }
    }
}
