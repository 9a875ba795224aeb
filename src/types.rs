//! Core types for string extraction.
//!
//! This module defines the fundamental data structures shared by the
//! format front end, the address index and the descriptor scanner.

use serde::Serialize;

/// Byte order of the words stored in a binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

/// Native pointer width of a binary.
///
/// Descriptors are two consecutive words of this width: a pointer followed
/// by a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerWidth {
    /// 32-bit targets (4-byte words)
    Four,
    /// 64-bit targets (8-byte words)
    Eight,
}

impl PointerWidth {
    /// Number of bytes in one word.
    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            PointerWidth::Four => 4,
            PointerWidth::Eight => 8,
        }
    }
}

/// Architecture information needed to decode descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryInfo {
    pub pointer_width: PointerWidth,
    pub byte_order: ByteOrder,
}

impl BinaryInfo {
    pub fn new(pointer_width: PointerWidth, byte_order: ByteOrder) -> Self {
        Self {
            pointer_width,
            byte_order,
        }
    }

    pub fn new_64bit_le() -> Self {
        Self::new(PointerWidth::Eight, ByteOrder::Little)
    }

    pub fn new_32bit_le() -> Self {
        Self::new(PointerWidth::Four, ByteOrder::Little)
    }

    pub fn new_64bit_be() -> Self {
        Self::new(PointerWidth::Eight, ByteOrder::Big)
    }

    pub fn new_32bit_be() -> Self {
        Self::new(PointerWidth::Four, ByteOrder::Big)
    }

    /// Size of one pointer (and one length) field in bytes.
    #[inline]
    pub fn ptr_size(&self) -> usize {
        self.pointer_width.bytes()
    }

    /// Size of a full `(pointer, length)` descriptor in bytes.
    #[inline]
    pub fn struct_size(&self) -> usize {
        self.ptr_size() * 2
    }
}

/// A loadable section of a binary as handed over by the format front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// Section name, when the format provides one
    pub name: Option<String>,
    /// Virtual address the section is mapped at
    pub addr: u64,
    /// Raw on-disk content; `None` for zero-filled sections
    pub data: Option<&'a [u8]>,
}

impl<'a> Section<'a> {
    pub fn new(name: Option<&str>, addr: u64, data: &'a [u8]) -> Self {
        Self {
            name: name.map(str::to_string),
            addr,
            data: Some(data),
        }
    }

    /// A section that occupies address space but has no file content.
    pub fn zero_filled(name: Option<&str>, addr: u64) -> Self {
        Self {
            name: name.map(str::to_string),
            addr,
            data: None,
        }
    }
}

/// Represents a string structure found in binary (pointer + length pair).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringStruct {
    /// Offset in the scanned section where this structure was found
    pub struct_offset: u64,
    /// Virtual address of the string data
    pub ptr: u64,
    /// Length of the string
    pub len: u64,
}

/// A string recovered through a descriptor.
///
/// Holds its own copy of the bytes, so it outlives the section buffer it was
/// sliced from. Only printable ASCII ever gets here, which keeps the content
/// valid UTF-8; ordering is plain byte-wise comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExtractedString {
    value: String,
}

impl ExtractedString {
    /// Copy `bytes` out if every byte is printable ASCII.
    pub fn from_printable(bytes: &[u8]) -> Option<Self> {
        if !crate::validation::is_printable(bytes) {
            return None;
        }
        String::from_utf8(bytes.to_vec())
            .ok()
            .map(|value| Self { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl std::fmt::Display for ExtractedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
