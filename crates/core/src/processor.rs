//! Mediator between a front-end and the codec engine.
//!
//! `Processor` owns a `HuffEngine` and a `ProgressSink`. It forwards each
//! user action to the engine, reports completion through the sink, and
//! applies the one policy decision the engine does not make: refusing a
//! compression that makes the data larger unless forced.
//!
//! # Example
//! ```
//! use huffpack_core::processor::{compress_bytes, uncompress_bytes};
//!
//! let data = b"a long run of repeated text, repeated text, repeated text".repeat(100);
//! let packed = compress_bytes(&data, false).unwrap();
//! assert!(packed.len() < data.len());
//! assert_eq!(uncompress_bytes(&packed).unwrap(), data);
//! ```

use std::io::{Read, Write};

use crate::engine::HuffEngine;
use crate::error::{Error, Result};
use crate::metrics::Metrics;
use crate::progress::{ProgressSink, Silent};

/// Drives the engine on behalf of a front-end.
#[derive(Debug)]
pub struct Processor<S: ProgressSink = Silent> {
    engine: HuffEngine,
    sink: S,
}

impl Default for Processor<Silent> {
    fn default() -> Self {
        Self::new(Silent)
    }
}

impl<S: ProgressSink> Processor<S> {
    pub fn new(sink: S) -> Self {
        Self {
            engine: HuffEngine::new(),
            sink,
        }
    }

    /// First compression pass: count frequencies and build the code table.
    pub fn preprocess_compress<R: Read>(&mut self, input: R) -> Result<()> {
        self.engine.preprocess(input, &mut self.sink)?;
        self.sink.update("Finished preprocessing");
        Ok(())
    }

    /// Second compression pass: write the compressed form of `input`.
    ///
    /// `input` must be the data given to `preprocess_compress`. When the
    /// compressed result is larger than the input the output has still been
    /// written, but the call fails with `Error::SizeRegression` unless
    /// `force` is set. Equal sizes are accepted.
    pub fn compress<R: Read, W: Write>(&mut self, input: R, output: W, force: bool) -> Result<Metrics> {
        let metrics = self.engine.compress(input, output, &mut self.sink)?;
        self.sink.update("Finished compression");

        let saved = metrics.bits_saved();
        if saved < 0 && !force {
            let overhead_bits = saved.unsigned_abs();
            self.sink.update(&format!(
                "Compression uses {} more bits. Use force compression to proceed anyway.",
                overhead_bits
            ));
            return Err(Error::SizeRegression { overhead_bits });
        }

        Ok(metrics)
    }

    /// Restore the original data from a compressed stream.
    pub fn uncompress<R: Read, W: Write>(&mut self, input: R, output: W) -> Result<Metrics> {
        let metrics = self.engine.uncompress(input, output, &mut self.sink)?;
        self.sink.update("Finished uncompression");
        Ok(metrics)
    }

    /// Bits saved by the last successful operation (see
    /// `HuffEngine::bits_saved`).
    pub fn bits_saved(&self) -> i64 {
        self.engine.bits_saved()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Compress an in-memory buffer.
///
/// # Errors
/// `Error::SizeRegression` if the result would be larger than `data` and
/// `force` is false.
pub fn compress_bytes(data: &[u8], force: bool) -> Result<Vec<u8>> {
    let mut processor = Processor::new(Silent);
    processor.preprocess_compress(data)?;

    let mut output = Vec::new();
    processor.compress(data, &mut output, force)?;
    Ok(output)
}

/// Uncompress an in-memory buffer. Nothing is returned unless the whole
/// stream decodes.
pub fn uncompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    Processor::new(Silent).uncompress(data, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HEADER_BITS;
    use crate::progress::Recorder;

    #[test]
    fn test_small_input_regresses() {
        // Any tiny input loses to the fixed-size header
        let result = compress_bytes(b"tiny", false);
        match result {
            Err(Error::SizeRegression { overhead_bits }) => {
                assert!(overhead_bits > HEADER_BITS - 32);
            }
            other => panic!("expected size regression, got {:?}", other),
        }
    }

    #[test]
    fn test_force_overrides_regression() {
        let packed = compress_bytes(b"tiny", true).unwrap();
        assert_eq!(uncompress_bytes(&packed).unwrap(), b"tiny");
    }

    #[test]
    fn test_regression_reported_to_sink() {
        let mut processor = Processor::new(Recorder::new());
        processor.preprocess_compress(&b"xyz"[..]).unwrap();
        let result = processor.compress(&b"xyz"[..], Vec::new(), false);

        let Err(Error::SizeRegression { overhead_bits }) = result else {
            panic!("expected size regression");
        };
        assert_eq!(overhead_bits as i64, -processor.bits_saved());

        let recorder = processor.into_sink();
        assert!(recorder.saw("Finished preprocessing"));
        assert!(recorder.saw("Finished compression"));
        assert!(recorder.saw(&format!("Compression uses {} more bits", overhead_bits)));
    }

    #[test]
    fn test_uncompress_reports_completion() {
        let packed = compress_bytes(b"round and round", true).unwrap();

        let mut processor = Processor::new(Recorder::new());
        let mut out = Vec::new();
        processor.uncompress(&packed[..], &mut out).unwrap();

        assert_eq!(out, b"round and round");
        assert!(processor.sink().saw("Finished uncompression"));
    }

    #[test]
    fn test_compress_without_preprocess() {
        let mut processor = Processor::new(Silent);
        assert!(processor.compress(&b"data"[..], Vec::new(), true).is_err());
    }
}
