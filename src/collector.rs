//! Deduplicating sink for extracted strings.

use std::collections::BTreeSet;

use crate::types::ExtractedString;

/// Collects unique strings and hands them back in byte-wise order.
#[derive(Debug, Default, Clone)]
pub struct StringCollector {
    strings: BTreeSet<ExtractedString>,
}

impl StringCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string. Inserting the same bytes again has no effect.
    pub fn insert(&mut self, string: ExtractedString) {
        self.strings.insert(string);
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Unique strings in ascending byte order.
    pub fn finalize(self) -> Vec<ExtractedString> {
        self.strings.into_iter().collect()
    }
}

impl FromIterator<ExtractedString> for StringCollector {
    fn from_iter<I: IntoIterator<Item = ExtractedString>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().collect(),
        }
    }
}
