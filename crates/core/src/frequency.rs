//! Symbol alphabet and frequency counting.
//!
//! A symbol is one 8-bit word of the original data. One extra value,
//! `PSEUDO_EOF`, marks the end of content in the compressed bitstream; it is
//! never counted from the input and always enters the tree with weight 1.

use std::io::Read;

use crate::bitio::BitReader;
use crate::error::{HuffmanError, Result};

/// A symbol value: `0..ALPHABET_SIZE` for data words, or `PSEUDO_EOF`.
pub type Symbol = u16;

/// Width of one data word in bits.
pub const BITS_PER_WORD: usize = 8;

/// Number of distinct data symbols.
pub const ALPHABET_SIZE: usize = 1 << BITS_PER_WORD;

/// Reserved end-of-content symbol, one past the last data symbol.
pub const PSEUDO_EOF: Symbol = ALPHABET_SIZE as Symbol;

/// Per-symbol occurrence counts for one complete pass over an input.
///
/// Always exactly `ALPHABET_SIZE` entries, indexed by symbol value. Counts
/// are 32-bit because that is the width the header stores them at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Create a table with every count at zero.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Create a table from raw counts (e.g. read back from a header).
    pub fn from_counts(counts: [u32; ALPHABET_SIZE]) -> Self {
        Self { counts }
    }

    /// Count every word in `reader` until it is exhausted.
    ///
    /// Consumes the whole stream. A trailing partial word (fewer than
    /// `BITS_PER_WORD` bits) counts as exhaustion.
    ///
    /// # Errors
    /// - `HuffmanError::FrequencyOverflow` if a count would exceed `u32::MAX`
    /// - `Error::Io` if the underlying reader fails
    pub fn count_stream<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let mut table = Self::new();
        while let Some(word) = reader.read_bits(BITS_PER_WORD)? {
            table.record(word as u8)?;
        }
        Ok(table)
    }

    /// Count the bytes of an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut table = Self::new();
        for &byte in data {
            table.record(byte)?;
        }
        Ok(table)
    }

    /// Record one occurrence of `byte`.
    pub fn record(&mut self, byte: u8) -> Result<()> {
        let slot = &mut self.counts[byte as usize];
        *slot = slot
            .checked_add(1)
            .ok_or(HuffmanError::FrequencyOverflow {
                symbol: byte as Symbol,
            })?;
        Ok(())
    }

    /// Count for `symbol`; zero for `PSEUDO_EOF` and anything out of range.
    pub fn get(&self, symbol: Symbol) -> u32 {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &[u32; ALPHABET_SIZE] {
        &self.counts
    }

    /// Iterate `(symbol, count)` over symbols with a non-zero count, in
    /// ascending symbol order.
    pub fn present(&self) -> impl Iterator<Item = (Symbol, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count != 0)
            .map(|(symbol, &count)| (symbol as Symbol, count))
    }

    /// Number of symbols that occur at least once.
    pub fn distinct(&self) -> usize {
        self.present().count()
    }

    /// Total number of words counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
