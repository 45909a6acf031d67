//! Metrics for a single compress or uncompress operation.
//!
//! Sizes are tracked in bits because the compressed content is not byte
//! aligned:
//! - raw bits: the uncompressed data at the fixed word width
//! - header bits: the fixed-size frequency header
//! - content bits: every Huffman code written or read, end marker included
//!
//! Final-byte padding is never counted.
//!
//! # Thread Safety
//!
//! `Metrics` is a plain value; each operation produces its own.

use std::time::{Duration, Instant};

/// Which direction an operation ran in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Compress,
    Uncompress,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Compress => "compress",
            Operation::Uncompress => "uncompress",
        }
    }
}

/// Measured sizes and timing for one operation.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub operation: Operation,

    // === Timing ===
    /// When the operation started
    pub start_time: Instant,

    /// When the operation ended (set on completion)
    pub end_time: Option<Instant>,

    // === Sizes ===
    /// Uncompressed size in bits
    pub raw_bits: u64,

    /// Header size in bits
    pub header_bits: u64,

    /// Encoded content size in bits, end marker included
    pub content_bits: u64,

    // === Codec ===
    /// Data symbols encoded or decoded
    pub symbols: u64,

    /// Distinct data symbols in the frequency table
    pub distinct_symbols: usize,

    /// Longest code in the code table
    pub max_code_len: usize,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            start_time: Instant::now(),
            end_time: None,
            raw_bits: 0,
            header_bits: 0,
            content_bits: 0,
            symbols: 0,
            distinct_symbols: 0,
            max_code_len: 0,
        }
    }

    /// Mark the operation as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compressed size in bits (header + content).
    pub fn compressed_bits(&self) -> u64 {
        self.header_bits + self.content_bits
    }

    /// Raw bits minus compressed bits. Negative when compression grew the
    /// data.
    pub fn bits_saved(&self) -> i64 {
        self.raw_bits as i64 - self.compressed_bits() as i64
    }

    /// Compute compression ratio (compressed / raw).
    ///
    /// Returns 0.0 if there was no data.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bits == 0 {
            0.0
        } else {
            self.compressed_bits() as f64 / self.raw_bits as f64
        }
    }

    /// Average code length in bits per data symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.content_bits as f64 / self.symbols as f64
        }
    }

    /// Compute throughput in uncompressed bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            (self.raw_bits / 8) as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== {} Summary ===", self.operation.as_str());
        println!("Duration: {} ms", self.duration().as_millis());
        println!();
        println!("Raw:        {} bits ({} bytes)", self.raw_bits, self.raw_bits / 8);
        println!("Header:     {} bits", self.header_bits);
        println!("Content:    {} bits", self.content_bits);
        println!(
            "Compressed: {} bits ({} bytes)",
            self.compressed_bits(),
            self.compressed_bits().div_ceil(8)
        );
        println!("Saved:      {} bits", self.bits_saved());
        println!("Ratio:      {:.1}%", self.compression_ratio() * 100.0);
        println!();
        println!("Symbols: {} ({} distinct)", self.symbols, self.distinct_symbols);
        println!(
            "Code length: {:.3} bits/symbol average, {} max",
            self.bits_per_symbol(),
            self.max_code_len
        );
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "operation={}\n\
             duration_ms={}\n\
             raw_bits={}\n\
             header_bits={}\n\
             content_bits={}\n\
             bits_saved={}\n\
             compression_ratio={:.4}\n\
             symbols={}\n\
             distinct_symbols={}\n\
             max_code_len={}\n",
            self.operation.as_str(),
            self.duration().as_millis(),
            self.raw_bits,
            self.header_bits,
            self.content_bits,
            self.bits_saved(),
            self.compression_ratio(),
            self.symbols,
            self.distinct_symbols,
            self.max_code_len,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new(Operation::Compress);
        assert_eq!(metrics.raw_bits, 0);
        assert_eq!(metrics.bits_saved(), 0);
        assert!(metrics.end_time.is_none());
    }

    #[test]
    fn test_bits_saved_sign() {
        let mut metrics = Metrics::new(Operation::Compress);
        metrics.raw_bits = 10_000;
        metrics.header_bits = 8_256;
        metrics.content_bits = 1_000;
        assert_eq!(metrics.bits_saved(), 744);

        metrics.raw_bits = 800;
        assert_eq!(metrics.bits_saved(), -8_456);
    }

    #[test]
    fn test_compression_ratio() {
        let mut metrics = Metrics::new(Operation::Compress);
        assert_eq!(metrics.compression_ratio(), 0.0);

        metrics.raw_bits = 1000;
        metrics.content_bits = 500;
        assert!((metrics.compression_ratio() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_bits_per_symbol() {
        let mut metrics = Metrics::new(Operation::Uncompress);
        metrics.symbols = 4;
        metrics.content_bits = 10;
        assert!((metrics.bits_per_symbol() - 2.5).abs() < 0.001);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = Metrics::new(Operation::Uncompress);
        metrics.raw_bits = 80;
        metrics.complete();

        let text = metrics.export_text();
        assert!(text.contains("operation=uncompress"));
        assert!(text.contains("raw_bits=80"));
        assert!(text.contains("bits_saved=80"));
    }
}
