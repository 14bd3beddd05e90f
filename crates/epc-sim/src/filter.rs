//! Inventory inclusion decision
//!
//! Combines the antenna/RSSI gate with the filter list into a single
//! per-tag decision. Killed tags never reach this module; the reader drops
//! them before filtering.

use epc_tag::{RssiFilter, Tag, TagFilter};
use tracing::trace;

/// Decide whether a tag is part of an inventory round
///
/// The tag must have been observed on at least one selected antenna. With a
/// neutral RSSI filter any observation counts; otherwise the observation
/// must satisfy a non-zero minimum bound or a non-zero maximum bound. The
/// bounds are deliberately OR-combined, reproducing the established reader
/// behavior even though they look like a closed range.
///
/// Filters apply in order. A filter whose target bank is absent or empty
/// excludes the tag when inclusive and is skipped when exclusive. Mixed-mask
/// filters are decomposed into trivial sub-filters; all sub-filters must
/// pass.
pub fn include_tag(
    tag: &Tag,
    antennas: &[u16],
    filters: &[TagFilter],
    rssi_filter: &RssiFilter,
) -> bool {
    let mut seen = false;
    for antenna in antennas {
        let Some(&peak) = tag.antennas.get(antenna) else {
            continue;
        };
        if rssi_filter.is_neutral() {
            seen = true;
            break;
        }
        if rssi_filter.min_rssi != 0 && peak >= rssi_filter.min_rssi {
            seen = true;
            break;
        }
        if rssi_filter.max_rssi != 0 && peak <= rssi_filter.max_rssi {
            seen = true;
            break;
        }
    }
    if !seen {
        trace!("tag {} not visible on any selected antenna", tag.id);
        return false;
    }

    for filter in filters {
        let data = tag.bank(filter.bank).unwrap_or(&[]);
        if data.is_empty() {
            // nothing to compare: an inclusive filter can never match
            if filter.matching {
                return false;
            }
            continue;
        }

        match filter.decompose() {
            Some(sub_filters) => {
                if sub_filters.iter().any(|sub| !sub.matches(data)) {
                    return false;
                }
            }
            None => {
                if !filter.matches(data) {
                    return false;
                }
            }
        }
    }

    true
}
