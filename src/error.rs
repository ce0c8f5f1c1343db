//! Error types for encoding, decoding and header parsing.
//!
//! An empty source and a single-symbol source are not errors: they show up as
//! an absent tree and a leaf root respectively.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HuffmanError {
    /// The byte has no code in the table the encoder was built from.
    #[error("symbol {symbol} at byte {position} has no code")]
    UnknownSymbol { symbol: u8, position: usize },

    /// A character other than '0' or '1' inside the encoded body.
    #[error("malformed bit {found:?} at position {position}")]
    MalformedBit { found: char, position: usize },

    /// The walk stopped between the root and a leaf.
    #[error("code truncated at position {position}")]
    TruncatedCode { position: usize },

    /// A single-symbol document repeats its symbol more times than fit in memory.
    #[error("cannot materialize {count} repeated symbols")]
    OutputTooLarge { count: u64 },

    #[error("invalid header: {0}")]
    Header(#[from] HeaderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Frequency header parse errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("{token:?} is not a non-negative integer")]
    InvalidNumber { token: String },

    #[error("symbol {value} is outside 0..=255")]
    SymbolOutOfRange { value: u64 },

    #[error("symbol {symbol} has no count")]
    MissingCount { symbol: u8 },

    #[error("counts add up to more than {}", u64::MAX)]
    CountOverflow,
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
