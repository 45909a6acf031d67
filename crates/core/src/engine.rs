//! The Huffman codec engine.
//!
//! `HuffEngine` does the compression work: it counts frequencies, builds the
//! tree and code table, writes header and content, and reverses the process
//! on uncompress. Status strings go to the `ProgressSink` passed into each
//! call; the engine holds no reference to whoever drives it.
//!
//! # Lifecycle
//!
//! Compression takes two passes over the input:
//! 1. `preprocess` counts frequencies and derives the code table
//! 2. `compress` writes header and content, consuming the prepared table
//!
//! Uncompression is a single pass. Tables never outlive the operation they
//! were built for.

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::header;
use crate::metrics::{Metrics, Operation};
use crate::progress::ProgressSink;
use crate::transcoder;
use crate::tree::HuffmanTree;

/// Frequency and code tables from a `preprocess` pass.
#[derive(Debug, Clone)]
struct Prepared {
    frequencies: FrequencyTable,
    codes: CodeTable,
    max_code_len: usize,
}

/// Compression and uncompression engine.
#[derive(Debug, Default)]
pub struct HuffEngine {
    prepared: Option<Prepared>,
    last: Option<Metrics>,
}

impl HuffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count frequencies in `input` and derive the code table for the next
    /// `compress`.
    ///
    /// Consumes all of `input`. Replaces any table from an earlier
    /// `preprocess` that was never used.
    pub fn preprocess<R: Read>(&mut self, input: R, sink: &mut dyn ProgressSink) -> Result<&FrequencyTable> {
        self.prepared = None;

        let mut reader = BitReader::new(input);
        let frequencies = FrequencyTable::count_stream(&mut reader)?;
        sink.update(&format!(
            "Finished counting frequencies: {} symbols, {} distinct",
            frequencies.total(),
            frequencies.distinct()
        ));

        let (codes, max_code_len) = build_codes(&frequencies, sink)?;
        let prepared = self.prepared.insert(Prepared {
            frequencies,
            codes,
            max_code_len,
        });
        Ok(&prepared.frequencies)
    }

    /// Write header and encoded content for `input` to `output`.
    ///
    /// `input` must hold the same data `preprocess` saw. The prepared table
    /// is consumed whether or not this succeeds. The size check is the
    /// caller's business; see `bits_saved`.
    ///
    /// # Errors
    /// - `HuffmanError::NotPreprocessed` without a preceding `preprocess`
    /// - `HuffmanError::UnknownSymbol` if `input` has a word the table lacks
    /// - `Error::Io` on stream failure
    pub fn compress<R: Read, W: Write>(
        &mut self,
        input: R,
        output: W,
        sink: &mut dyn ProgressSink,
    ) -> Result<Metrics> {
        let prepared = self.prepared.take().ok_or(HuffmanError::NotPreprocessed)?;
        self.last = None;

        let mut metrics = Metrics::new(Operation::Compress);
        metrics.distinct_symbols = prepared.frequencies.distinct();
        metrics.max_code_len = prepared.max_code_len;

        let mut reader = BitReader::new(input);
        let mut writer = BitWriter::new(output);

        metrics.header_bits = header::write_header(&mut writer, &prepared.frequencies)?;
        sink.update("Finished writing header");

        let stats = transcoder::encode_content(&mut reader, &mut writer, &prepared.codes)?;
        writer.finish()?;
        sink.update(&format!(
            "Finished writing content: {} symbols in {} bits",
            stats.symbols, stats.content_bits
        ));

        metrics.symbols = stats.symbols;
        metrics.raw_bits = stats.raw_bits();
        metrics.content_bits = stats.content_bits;
        metrics.complete();

        self.last = Some(metrics.clone());
        Ok(metrics)
    }

    /// Read a compressed stream from `input` and write the original data to
    /// `output`.
    ///
    /// Decoded words go through a buffered bit writer, so a failing stream
    /// may already have produced some output; callers that must not leave
    /// partial output behind decode into memory first.
    ///
    /// # Errors
    /// - `FormatError` for a bad magic, bad terminator, truncated header or
    ///   content without an end marker
    /// - `Error::Io` on stream failure
    pub fn uncompress<R: Read, W: Write>(
        &mut self,
        input: R,
        output: W,
        sink: &mut dyn ProgressSink,
    ) -> Result<Metrics> {
        self.last = None;

        let mut metrics = Metrics::new(Operation::Uncompress);
        let mut reader = BitReader::new(input);
        let mut writer = BitWriter::new(output);

        let frequencies = header::read_header(&mut reader)?;
        metrics.header_bits = reader.bits_read();
        metrics.distinct_symbols = frequencies.distinct();
        sink.update("Finished reading header");

        let (codes, max_code_len) = build_codes(&frequencies, sink)?;
        metrics.max_code_len = max_code_len;

        let stats = transcoder::decode_content(&mut reader, &mut writer, &codes)?;
        writer.finish()?;
        sink.update(&format!(
            "Finished decoding content: {} symbols from {} bits",
            stats.symbols, stats.content_bits
        ));

        metrics.symbols = stats.symbols;
        metrics.raw_bits = stats.raw_bits();
        metrics.content_bits = stats.content_bits;
        metrics.complete();

        self.last = Some(metrics.clone());
        Ok(metrics)
    }

    /// True if a `preprocess` result is waiting for `compress`.
    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    /// Metrics of the last successful operation.
    pub fn metrics(&self) -> Option<&Metrics> {
        self.last.as_ref()
    }

    /// Bits saved by the last successful operation: uncompressed bits minus
    /// compressed bits (header included). Negative when compression grew the
    /// data; zero before any operation.
    pub fn bits_saved(&self) -> i64 {
        self.last.as_ref().map_or(0, Metrics::bits_saved)
    }
}

/// Build the tree for `frequencies` and derive its code table.
fn build_codes(frequencies: &FrequencyTable, sink: &mut dyn ProgressSink) -> Result<(CodeTable, usize)> {
    let tree = HuffmanTree::build(frequencies);
    sink.update(&format!(
        "Finished building Huffman tree: {} leaves, depth {}",
        tree.leaf_count(),
        tree.depth()
    ));

    let codes = CodeTable::from_tree(&tree)?;
    sink.update("Finished building code table");

    Ok((codes, tree.depth()))
}
