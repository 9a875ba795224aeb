use thiserror::Error;

/// Errors returned while loading a binary and preparing it for scanning.
///
/// Only a few conditions are fatal. A section that cannot be read, or a
/// candidate descriptor that points nowhere, just produces fewer strings and
/// never surfaces here.
///
/// # Error Categories
///
/// - [`Error::UnsupportedArchitecture`] - no known pointer width for the CPU
/// - [`Error::UnknownFormat`] - not a single-architecture ELF or Mach-O image
/// - [`Error::OutOfBounds`] - a word read would run past its buffer
/// - [`Error::Goblin`] - a recognized format that goblin failed to parse
#[derive(Error, Debug)]
pub enum Error {
    /// The binary's architecture cannot be mapped to a 4- or 8-byte pointer
    /// width. Scanning with a guessed width is never attempted.
    #[error("unsupported architecture: {0}")]
    UnsupportedArchitecture(String),

    /// The input is not an object format the front end understands.
    #[error("unknown binary format")]
    UnknownFormat,

    /// A word read of `width` bytes at `offset` does not fit in `len` bytes.
    #[error("out of bounds read: {width} bytes at offset {offset} of a {len} byte buffer")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },

    #[error("{0}")]
    Goblin(#[from] goblin::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
