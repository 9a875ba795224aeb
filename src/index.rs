//! Address-indexed view of a binary's section contents.

use std::collections::BTreeMap;

use crate::types::Section;

/// Maps virtual-address ranges to the bytes backing them.
///
/// Several sections may share a base address or overlap (alias views of the
/// same memory), so every base keeps a list of slices and a lookup returns
/// every slice that fully contains the requested range.
#[derive(Debug, Default, Clone)]
pub struct AddressIndex<'a> {
    ranges: BTreeMap<u64, Vec<&'a [u8]>>,
}

impl<'a> AddressIndex<'a> {
    /// Index every section that has file content.
    pub fn build(sections: &[Section<'a>]) -> Self {
        let mut index = Self::default();
        for section in sections {
            if let Some(data) = section.data {
                index.insert(section.addr, data);
            }
        }
        index
    }

    /// Add a section's bytes at `addr`, alongside any already there.
    pub fn insert(&mut self, addr: u64, data: &'a [u8]) {
        self.ranges.entry(addr).or_default().push(data);
    }

    /// Number of indexed sections.
    pub fn len(&self) -> usize {
        self.ranges.values().map(Vec::len).sum()
    }

    /// True if no section with content was indexed.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Every slice covering `[ptr, ptr + len)` completely.
    ///
    /// Returns nothing when the range falls outside all sections, which is
    /// the normal outcome for most candidates.
    pub fn resolve(&self, ptr: u64, len: u64) -> Vec<&'a [u8]> {
        // u128 keeps `base + size` and `ptr + len` from wrapping near the top
        // of the address space.
        let want_end = u128::from(ptr) + u128::from(len);
        let mut hits = Vec::new();

        for (&base, slices) in self.ranges.range(..=ptr) {
            for &data in slices {
                let end = u128::from(base) + data.len() as u128;
                if want_end <= end {
                    let offset = (ptr - base) as usize;
                    hits.push(&data[offset..offset + len as usize]);
                }
            }
        }

        hits
    }
}
