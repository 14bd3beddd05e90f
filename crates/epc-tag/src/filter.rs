//! Inventory filters
//!
//! A [`TagFilter`] selects tags by comparing a bit pattern against a window
//! of a memory bank. Filters with a mixed mask cannot be evaluated in one
//! comparison; [`TagFilter::decompose`] splits them into trivial sub-filters
//! covering the mask's 1-runs, whose conjunction reproduces the masked
//! comparison.

use tracing::debug;

use crate::bits;
use crate::MemoryBank;

/// RSSI window applied during inventory
///
/// A bound of 0 is neutral. When both bounds are set, a tag passes if it
/// satisfies either one; the bounds are not combined into a closed range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RssiFilter {
    /// Minimum peak RSSI, 0 = no lower bound
    pub min_rssi: i16,
    /// Maximum peak RSSI, 0 = no upper bound
    pub max_rssi: i16,
}

impl RssiFilter {
    /// Whether both bounds are neutral
    pub fn is_neutral(&self) -> bool {
        self.min_rssi == 0 && self.max_rssi == 0
    }
}

/// A bit-range selection filter over one memory bank
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagFilter {
    /// Bank the filter applies to
    pub bank: MemoryBank,
    /// First bank bit compared (MSB-first addressing)
    pub bit_offset: u16,
    /// Number of bits compared
    pub bit_length: u16,
    /// Pattern bits, starting at bit 0
    pub data: Vec<u8>,
    /// Mask bits; uniform (all-0 or all-1) masks are trivial
    pub mask: Vec<u8>,
    /// true = inclusive (tag must match), false = exclusive (match rejects)
    pub matching: bool,
}

/// Compare filter bits against a window of bank data
///
/// Bits are addressed most-significant-bit first; bits past the end of either
/// buffer read as 0. The comparison short-circuits on the first mismatch:
/// an inclusive filter then rejects, an exclusive filter accepts. If every
/// bit matches the polarity itself is returned, so an exclusive filter
/// rejects exactly when the pattern matches in full.
pub fn matches(
    filter_bits: &[u8],
    data_bits: &[u8],
    bit_offset: usize,
    bit_length: usize,
    inclusive: bool,
) -> bool {
    for i in 0..bit_length {
        if bits::bit(filter_bits, i) != bits::bit(data_bits, bit_offset + i) {
            return !inclusive;
        }
    }
    inclusive
}

impl TagFilter {
    /// Evaluate this filter against a bank's contents
    pub fn matches(&self, data: &[u8]) -> bool {
        matches(
            &self.data,
            data,
            self.bit_offset as usize,
            self.bit_length as usize,
            self.matching,
        )
    }

    /// Whether the mask is uniform over the compared range
    pub fn is_trivial(&self) -> bool {
        let len = self.bit_length as usize;
        let first = bits::bit(&self.mask, 0);
        (1..len).all(|i| bits::bit(&self.mask, i) == first)
    }

    /// Split a mixed-mask filter into trivial sub-filters
    ///
    /// Returns `None` for a trivial filter, which is evaluated as-is.
    /// Otherwise each maximal run of 1-bits in the mask becomes one
    /// sub-filter with an all-ones mask; the conjunction of the sub-filters
    /// reproduces the masked comparison.
    pub fn decompose(&self) -> Option<Vec<TagFilter>> {
        if self.is_trivial() {
            return None;
        }

        let len = self.bit_length as usize;
        let mut subs = Vec::new();
        let mut i = 0;
        while i < len {
            if !bits::bit(&self.mask, i) {
                i += 1;
                continue;
            }
            let start = i;
            while i < len && bits::bit(&self.mask, i) {
                i += 1;
            }
            let run = i - start;
            subs.push(TagFilter {
                bank: self.bank,
                bit_offset: self.bit_offset + start as u16,
                bit_length: run as u16,
                data: bits::copy_bits(&self.data, start, run),
                mask: vec![0xFF; run.div_ceil(8)],
                matching: self.matching,
            });
        }

        debug!(
            "decomposed {}-bit filter on {} into {} sub-filter(s)",
            self.bit_length,
            self.bank.name(),
            subs.len()
        );
        Some(subs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(data: &str, mask: &str, bit_offset: u16, bit_length: u16, matching: bool) -> TagFilter {
        TagFilter {
            bank: MemoryBank::User,
            bit_offset,
            bit_length,
            data: hex::decode(data).unwrap(),
            mask: hex::decode(mask).unwrap(),
            matching,
        }
    }

    #[test]
    fn test_matches_inclusive() {
        let data = hex::decode("aaaabbbbcccc").unwrap();
        let pattern = hex::decode("aaaabbbb").unwrap();

        assert!(matches(&pattern, &data, 0, 32, true));
        // shifted window no longer matches
        assert!(!matches(&pattern, &data, 16, 32, true));
    }

    #[test]
    fn test_matches_exclusive_inverts() {
        let data = hex::decode("aaaabbbbcccc").unwrap();
        let pattern = hex::decode("aaaabbbb").unwrap();

        assert!(!matches(&pattern, &data, 0, 32, false));
        assert!(matches(&pattern, &data, 16, 32, false));
    }

    #[test]
    fn test_matches_past_end_reads_zero() {
        let data = hex::decode("ff").unwrap();
        let zeros = vec![0u8; 2];
        // bits 8..24 of a 1-byte buffer are all 0
        assert!(matches(&zeros, &data, 8, 16, true));
    }

    #[test]
    fn test_trivial_masks() {
        assert!(filter("aaaa", "ffff", 0, 16, true).is_trivial());
        assert!(filter("aaaa", "0000", 0, 16, true).is_trivial());
        assert!(!filter("aaaa", "ff00", 0, 16, true).is_trivial());
        // mixed bits outside the compared range are irrelevant
        assert!(filter("aa", "ff0f", 0, 8, true).is_trivial());
    }

    #[test]
    fn test_decompose_trivial_is_none() {
        assert_eq!(filter("aaaa", "ffff", 0, 16, true).decompose(), None);
        assert_eq!(filter("aaaa", "0000", 0, 16, true).decompose(), None);
    }

    #[test]
    fn test_decompose_two_runs() {
        let f = filter("2222555588887777", "ffff0000ffff0000", 32, 64, true);
        let subs = f.decompose().unwrap();

        assert_eq!(subs.len(), 2);

        assert_eq!(subs[0].bit_offset, 32);
        assert_eq!(subs[0].bit_length, 16);
        assert_eq!(subs[0].data, hex::decode("2222").unwrap());
        assert!(subs[0].is_trivial());

        assert_eq!(subs[1].bit_offset, 64);
        assert_eq!(subs[1].bit_length, 16);
        assert_eq!(subs[1].data, hex::decode("8888").unwrap());
        assert!(subs[1].is_trivial());
    }

    #[test]
    fn test_decompose_equivalent_to_masked_compare() {
        // data matches the pattern exactly in the masked regions only
        let bank = hex::decode("2222ffff8888ffff").unwrap();
        let f = filter("2222555588887777", "ffff0000ffff0000", 0, 64, true);

        let subs = f.decompose().unwrap();
        assert!(subs.iter().all(|s| s.matches(&bank)));

        // flip one masked bit and one sub-filter fails
        let mut broken = bank.clone();
        broken[4] ^= 0x01;
        assert!(!subs.iter().all(|s| s.matches(&broken)));

        // flipping an unmasked bit changes nothing
        let mut ignored = bank;
        ignored[2] ^= 0xFF;
        assert!(subs.iter().all(|s| s.matches(&ignored)));
    }

    #[test]
    fn test_decompose_unaligned_run() {
        // mask 0x0FF0: one run of 8 bits starting at bit 4
        let f = filter("abcd", "0ff0", 0, 16, true);
        let subs = f.decompose().unwrap();

        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].bit_offset, 4);
        assert_eq!(subs[0].bit_length, 8);
        // bits 4..12 of 0xabcd are 0xbc
        assert_eq!(subs[0].data, vec![0xBC]);
    }
}
