//! # gostrings - Length-prefixed string extraction
//!
//! Standard `strings(1)` looks for NUL-terminated runs of ASCII. Languages
//! that represent strings as a `(pointer, length)` pair, Go being the common
//! case, pack their literals back to back in read-only data with no
//! separators, so a NUL scan either misses them or glues them into one blob.
//!
//! This crate finds the descriptors instead. Every word-aligned position of
//! every section is read as a candidate `(pointer, length)` pair; candidates
//! with a plausible length whose pointer lands inside a loaded section are
//! resolved, and the bytes are kept if they are entirely printable ASCII.
//!
//! The heuristic over-detects by nature: any bit pattern with the right shape
//! is a candidate. The length window and the printability check are the only
//! precision controls.
//!
//! ## Usage
//!
//! ```no_run
//! let data = std::fs::read("my_binary").unwrap();
//! for s in gostrings::extract_strings(&data).unwrap() {
//!     println!("{}", s);
//! }
//! ```
//!
//! Callers with their own format front end can go straight to
//! [`extract_from_sections`].

pub mod binary;
mod collector;
mod error;
mod extraction;
mod index;
mod types;
pub mod validation;

pub use binary::LoadedBinary;
pub use collector::StringCollector;
pub use error::{Error, Result};
pub use extraction::{extract_from_structures, find_string_structures, read_word, scan_section};
pub use index::AddressIndex;
pub use types::{BinaryInfo, ByteOrder, ExtractedString, PointerWidth, Section, StringStruct};

// Re-export goblin so library clients can parse binaries themselves
pub use goblin;
use goblin::Object;
use rayon::prelude::*;

/// Options for string extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Shortest descriptor length accepted
    pub min_length: usize,
    /// Longest descriptor length accepted
    pub max_length: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_length: validation::MIN_LEN as usize,
            max_length: validation::MAX_LEN as usize,
        }
    }
}

impl ExtractOptions {
    /// Options with the default 4..=2048 length window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shortest descriptor length accepted.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Set the longest descriptor length accepted.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

/// Parse a binary and extract its length-prefixed strings.
///
/// # Returns
///
/// Unique strings in ascending byte order.
///
/// # Errors
///
/// Fails if the data is not an ELF or single-architecture Mach-O image, or if
/// its architecture has no known pointer width.
pub fn extract_strings(data: &[u8]) -> Result<Vec<ExtractedString>> {
    extract_strings_with_options(data, &ExtractOptions::default())
}

/// Extract strings with custom options.
pub fn extract_strings_with_options(
    data: &[u8],
    opts: &ExtractOptions,
) -> Result<Vec<ExtractedString>> {
    let object = Object::parse(data).map_err(|e| match e {
        goblin::error::Error::BadMagic(_) => Error::UnknownFormat,
        other => Error::Goblin(other),
    })?;
    extract_from_object(&object, data, opts)
}

/// Extract strings from a pre-parsed object.
///
/// This allows library clients who have already parsed the binary to avoid
/// re-parsing.
pub fn extract_from_object<'a>(
    object: &Object<'a>,
    data: &'a [u8],
    opts: &ExtractOptions,
) -> Result<Vec<ExtractedString>> {
    let loaded = binary::load_object(object, data)?;
    tracing::debug!(
        "extract_from_object: {} binary, {}-byte pointers, {:?} endian, {} sections",
        loaded.format,
        loaded.info.ptr_size(),
        loaded.info.byte_order,
        loaded.sections.len()
    );
    Ok(extract_from_sections(&loaded.sections, &loaded.info, opts))
}

/// Extract strings from sections supplied by any front end.
///
/// Builds one [`AddressIndex`] over all sections with content, then scans
/// every such section, including the ones that hold string data, since a
/// descriptor may live next to the bytes it points at. Sections are scanned
/// in parallel; the result does not depend on scheduling.
pub fn extract_from_sections(
    sections: &[Section<'_>],
    info: &BinaryInfo,
    opts: &ExtractOptions,
) -> Vec<ExtractedString> {
    let index = AddressIndex::build(sections);
    if index.is_empty() {
        tracing::debug!("extract_from_sections: no sections with content");
        return Vec::new();
    }

    let found: Vec<ExtractedString> = sections
        .par_iter()
        .filter_map(|section| section.data)
        .flat_map_iter(|data| scan_section(data, info, &index, opts))
        .collect();

    let collector: StringCollector = found.into_iter().collect();
    tracing::info!(
        "extract_from_sections: {} unique strings from {} sections",
        collector.len(),
        index.len()
    );
    collector.finalize()
}
