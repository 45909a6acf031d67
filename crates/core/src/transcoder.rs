//! Content encoding and decoding.
//!
//! Encode translates every input word into its Huffman code and terminates
//! the content with the `PSEUDO_EOF` code. Decode reads one bit at a time,
//! growing a candidate code until it matches a table entry exactly.
//!
//! The compressed bitstream has no symbol boundaries of its own; the end
//! marker is the only way the decoder knows where content stops and final
//! byte padding begins.

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::code_table::{Code, CodeTable};
use crate::error::{FormatError, HuffmanError, Result};
use crate::frequency::{Symbol, BITS_PER_WORD, PSEUDO_EOF};

/// Counters from one content pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentStats {
    /// Data symbols encoded or decoded (end marker excluded)
    pub symbols: u64,
    /// Content bits written or read, end marker included
    pub content_bits: u64,
}

impl ContentStats {
    /// Size of the symbols at the fixed word width.
    pub fn raw_bits(&self) -> u64 {
        self.symbols * BITS_PER_WORD as u64
    }
}

/// Encode every word of `input` followed by the end marker.
///
/// # Errors
/// - `HuffmanError::UnknownSymbol` if a word has no code (the input differs
///   from the one the table was built for)
/// - `Error::Io` on stream failure
pub fn encode_content<R: Read, W: Write>(
    input: &mut BitReader<R>,
    output: &mut BitWriter<W>,
    table: &CodeTable,
) -> Result<ContentStats> {
    let mut stats = ContentStats::default();

    while let Some(word) = input.read_bits(BITS_PER_WORD)? {
        let symbol = word as Symbol;
        let code = table
            .code_for(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol })?;
        write_code(output, code)?;
        stats.symbols += 1;
        stats.content_bits += code.len() as u64;
    }

    let eof = table
        .eof_code()
        .ok_or(HuffmanError::UnknownSymbol { symbol: PSEUDO_EOF })?;
    write_code(output, eof)?;
    stats.content_bits += eof.len() as u64;

    Ok(stats)
}

fn write_code<W: Write>(output: &mut BitWriter<W>, code: Code) -> Result<()> {
    output.write_bits(code.bits(), code.len())
}

/// Decode content from `input` until the end marker, writing each data
/// symbol to `output` as one word.
///
/// A table whose end marker has the empty code (no data symbols) matches
/// before any bit is read, so such content decodes to nothing.
///
/// # Errors
/// - `FormatError::MissingEndMarker` if `input` runs out first
/// - `Error::Io` on stream failure
pub fn decode_content<R: Read, W: Write>(
    input: &mut BitReader<R>,
    output: &mut BitWriter<W>,
    table: &CodeTable,
) -> Result<ContentStats> {
    let mut stats = ContentStats::default();
    let mut candidate = Code::EMPTY;

    loop {
        if let Some(symbol) = table.symbol_for(&candidate) {
            stats.content_bits += candidate.len() as u64;
            if symbol == PSEUDO_EOF {
                return Ok(stats);
            }
            output.write_bits(symbol as u64, BITS_PER_WORD)?;
            stats.symbols += 1;
            candidate = Code::EMPTY;
        }

        let bit = input.read_bit()?.ok_or(FormatError::MissingEndMarker {
            bits_read: stats.content_bits + candidate.len() as u64,
        })?;
        candidate = candidate.push(bit)?;
    }
}
