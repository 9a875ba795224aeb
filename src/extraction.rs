//! String extraction utilities.
//!
//! Functions for finding `(pointer, length)` descriptors in section data and
//! resolving them to string bytes through the [`AddressIndex`].

use crate::error::{Error, Result};
use crate::index::AddressIndex;
use crate::types::{BinaryInfo, ByteOrder, ExtractedString, PointerWidth, StringStruct};
use crate::validation::is_plausible_descriptor;
use crate::ExtractOptions;

/// Copy `N` bytes at `offset`, or `None` if they are not all there.
#[inline]
fn word_bytes<const N: usize>(data: &[u8], offset: usize) -> Option<[u8; N]> {
    data.get(offset..offset.checked_add(N)?)?.try_into().ok()
}

/// Safely read a u64 in little-endian from a slice at a given offset.
#[inline]
fn read_u64_le(data: &[u8], offset: usize) -> Option<u64> {
    word_bytes(data, offset).map(u64::from_le_bytes)
}

/// Safely read a u64 in big-endian from a slice at a given offset.
#[inline]
fn read_u64_be(data: &[u8], offset: usize) -> Option<u64> {
    word_bytes(data, offset).map(u64::from_be_bytes)
}

/// Safely read a u32 in little-endian from a slice at a given offset.
#[inline]
fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    word_bytes(data, offset).map(u32::from_le_bytes)
}

/// Safely read a u32 in big-endian from a slice at a given offset.
#[inline]
fn read_u32_be(data: &[u8], offset: usize) -> Option<u32> {
    word_bytes(data, offset).map(u32::from_be_bytes)
}

/// Read one native-width word at `offset`.
///
/// Exactly `info.ptr_size()` bytes are read. 4-byte words are zero-extended
/// to `u64`, so a 32-bit read never looks at the bytes that follow it.
///
/// # Errors
///
/// [`Error::OutOfBounds`] if the word does not fit inside `data`.
pub fn read_word(data: &[u8], offset: usize, info: &BinaryInfo) -> Result<u64> {
    let word = match (info.pointer_width, info.byte_order) {
        (PointerWidth::Eight, ByteOrder::Little) => read_u64_le(data, offset),
        (PointerWidth::Eight, ByteOrder::Big) => read_u64_be(data, offset),
        (PointerWidth::Four, ByteOrder::Little) => read_u32_le(data, offset).map(u64::from),
        (PointerWidth::Four, ByteOrder::Big) => read_u32_be(data, offset).map(u64::from),
    };

    word.ok_or(Error::OutOfBounds {
        offset,
        width: info.ptr_size(),
        len: data.len(),
    })
}

/// Find pointer+length structures in a section.
///
/// Every word-aligned offset is tried as the start of a descriptor, so the
/// windows overlap: a descriptor at offset `i` does not stop the scanner from
/// also trying `i + ptr_size`. Only the numeric filters are applied here;
/// whether the pointer lands anywhere is decided by
/// [`extract_from_structures`].
///
/// A trailing fragment shorter than one full descriptor is ignored.
pub fn find_string_structures(
    section_data: &[u8],
    info: &BinaryInfo,
    opts: &ExtractOptions,
) -> Vec<StringStruct> {
    let mut structs = Vec::new();
    let ptr_size = info.ptr_size();
    let struct_size = info.struct_size();

    if section_data.len() < struct_size {
        return structs;
    }

    let min_len = opts.min_length as u64;
    let max_len = opts.max_length as u64;

    for i in (0..=section_data.len() - struct_size).step_by(ptr_size) {
        // Loop bound guarantees struct_size bytes at i
        let Ok(ptr) = read_word(section_data, i, info) else {
            continue;
        };
        let Ok(len) = read_word(section_data, i + ptr_size, info) else {
            continue;
        };

        if is_plausible_descriptor(ptr, len, min_len, max_len) {
            structs.push(StringStruct {
                struct_offset: i as u64,
                ptr,
                len,
            });
        }
    }

    structs
}

/// Resolve string structures against the address index.
///
/// A structure may resolve in several overlapping sections; each resolution
/// is checked for printability on its own and kept if it passes. Duplicates
/// are left for the collector to fold.
pub fn extract_from_structures(
    structs: &[StringStruct],
    index: &AddressIndex<'_>,
) -> Vec<ExtractedString> {
    let mut result = Vec::new();

    for s in structs {
        for bytes in index.resolve(s.ptr, s.len) {
            if let Some(string) = ExtractedString::from_printable(bytes) {
                result.push(string);
            }
        }
    }

    result
}

/// Scan one section's bytes for descriptors and return the strings they
/// point at.
pub fn scan_section(
    section_data: &[u8],
    info: &BinaryInfo,
    index: &AddressIndex<'_>,
    opts: &ExtractOptions,
) -> Vec<ExtractedString> {
    let structs = find_string_structures(section_data, info, opts);
    let strings = extract_from_structures(&structs, index);
    tracing::debug!(
        "scan_section: {} bytes, {} candidates, {} strings",
        section_data.len(),
        structs.len(),
        strings.len()
    );
    strings
}
