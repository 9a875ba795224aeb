//! Candidate filters for the descriptor scanner.
//!
//! These are the only precision controls the heuristic has: a length window,
//! a ceiling on pointer values, and a strict printability check on the bytes
//! a descriptor resolves to.

/// Shortest string a descriptor may describe. Shorter runs are noise.
pub const MIN_LEN: u64 = 4;

/// Longest string a descriptor may describe.
pub const MAX_LEN: u64 = 2048;

/// Pointers at or above this value are never real addresses. Bit patterns in
/// this band come from misaligned reads of small negative integers and other
/// non-pointer data.
pub const POINTER_CEILING: u64 = 0xFFFF_FFFF_FFFF_0000;

/// Printable ASCII: space (32) through tilde (126). Tabs, newlines, other
/// control codes and anything with the high bit set are rejected.
#[inline]
pub fn is_printable_byte(b: u8) -> bool {
    (0x20..=0x7E).contains(&b)
}

/// True if every byte of `data` is printable ASCII.
#[inline]
pub fn is_printable(data: &[u8]) -> bool {
    data.iter().all(|&b| is_printable_byte(b))
}

/// Numeric sanity check for a candidate `(pointer, length)` pair.
#[inline]
pub fn is_plausible_descriptor(ptr: u64, len: u64, min_len: u64, max_len: u64) -> bool {
    len >= min_len && len <= max_len && ptr < POINTER_CEILING
}
