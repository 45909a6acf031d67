//! Error types for the huffpack codec.
//!
//! All operations return structured errors rather than panicking. Every
//! error is scoped to the single compress or uncompress call that raised it;
//! the caller may retry with different input.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: invalid requests against the bit-level reader/writer
/// - Format: the compressed stream is not one we produced
/// - Huffman: tree or code table construction, encode-time lookups
/// - Size regression: compressed output would be larger than the input
/// - I/O: failure of the underlying byte streams
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., invalid bit count)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Compressed data is malformed (bad magic, bad terminator, truncated)
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Huffman codec error (e.g., code too long, unknown symbol)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Compression would grow the data and no override was requested
    #[error("compression uses {overhead_bits} more bits than the input; use force to proceed anyway")]
    SizeRegression { overhead_bits: u64 },

    /// Underlying stream read/write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Invalid bit count (more than 64 bits requested)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Compressed stream format errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// First word of the stream is not the magic number
    #[error("not a recognized compressed file: expected magic {expected:#010x}, got {actual:#010x}")]
    BadMagic { expected: u32, actual: u32 },

    /// Word after the frequency section is not the terminator
    #[error("invalid header: expected terminator {expected:#010x}, got {actual:#010x}")]
    BadTerminator { expected: u32, actual: u32 },

    /// Stream ended inside the header
    #[error("truncated header: stream ended after {bits_read} bits")]
    TruncatedHeader { bits_read: u64 },

    /// Content ran out of bits before the end-of-content code matched
    #[error("content ended after {bits_read} bits without an end-of-content marker")]
    MissingEndMarker { bits_read: u64 },
}

/// Huffman codec errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// A symbol occurred more often than a 32-bit header count can record
    #[error("frequency of symbol {symbol} exceeds {max}", max = u32::MAX)]
    FrequencyOverflow { symbol: u16 },

    /// Code length exceeds what a single code word can hold
    #[error("code length {length} exceeds maximum 64")]
    CodeLengthTooLong { length: usize },

    /// Encoding met a symbol that has no code in the table
    #[error("symbol {symbol} has no code in the table")]
    UnknownSymbol { symbol: u16 },

    /// `compress` called without a preceding `preprocess`
    #[error("compress requires a preprocessed frequency table")]
    NotPreprocessed,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
