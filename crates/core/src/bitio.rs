//! Bit-level I/O over byte streams.
//!
//! This module provides BitWriter and BitReader for the compressed file
//! format. Both operate in MSB-first (most significant bit first) order, for
//! header fields and Huffman codes alike.
//!
//! # Padding Rules
//! - BitWriter: pads the final incomplete byte with trailing zeros
//! - BitReader: cannot distinguish padding from data; the decoder stops at
//!   the end-of-content code and never looks at the padding
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitWriter, BitReader};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();  // Write 3 bits: 1, 0, 1
//! writer.write_bits(0b11, 2).unwrap();   // Write 2 bits: 1, 1
//! // Total: 10111 -> padded to 10111000
//!
//! let bytes = writer.finish().unwrap();
//! let mut reader = BitReader::new(&bytes[..]);
//! assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
//! assert_eq!(reader.read_bits(2).unwrap(), Some(0b11));
//! ```

use std::io::{ErrorKind, Read, Write};

use crate::error::{BitIoError, Result};

/// Completed bytes are handed to the inner writer in batches of this size.
const FLUSH_THRESHOLD: usize = 8 * 1024;

/// Writes bits MSB-first into an underlying byte sink.
///
/// Accumulates bits in a buffer and moves complete bytes to a pending batch,
/// which is written out once it grows past `FLUSH_THRESHOLD`. When finished,
/// pads the final partial byte with zeros.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - `bits_written` counts data bits only, never padding
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: W,
    /// Completed bytes not yet handed to `inner`
    pending: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter over `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pending: Vec::with_capacity(FLUSH_THRESHOLD),
            bit_buffer: 0,
            bit_count: 0,
            bits_written: 0,
        }
    }

    /// Write up to 64 bits to the output.
    ///
    /// Bits are written MSB-first. For example, writing value=0b101 with count=3
    /// writes bits 1, 0, 1 in that order.
    ///
    /// # Arguments
    /// - `value`: the bits to write (only the lowest `count` bits are used)
    /// - `count`: number of bits to write (0-64)
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `Error::Io` if flushing a batch to the inner writer fails
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            // How many bits fit in the current byte?
            let bits_to_write = remaining.min(8 - self.bit_count as usize);

            // Extract the top bits_to_write bits of what is left
            let shift = remaining - bits_to_write;
            let bits = ((value >> shift) & ((1u64 << bits_to_write) - 1)) as u8;

            self.bit_buffer |= bits << (8 - self.bit_count as usize - bits_to_write);
            self.bit_count += bits_to_write as u8;

            if self.bit_count == 8 {
                self.pending.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining -= bits_to_write;
        }
        self.bits_written += count as u64;

        if self.pending.len() >= FLUSH_THRESHOLD {
            self.flush_pending()?;
        }

        Ok(())
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u64, 1)
    }

    /// Return the total number of data bits written (padding excluded).
    pub fn bit_len(&self) -> u64 {
        self.bits_written
    }

    /// Finish writing and return the inner writer.
    ///
    /// Any remaining bits are padded with trailing zeros to complete the
    /// final byte, everything is flushed, and the writer is consumed.
    pub fn finish(mut self) -> Result<W> {
        if self.bit_count > 0 {
            self.pending.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
        self.flush_pending()?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn flush_pending(&mut self) -> Result<()> {
        self.inner.write_all(&self.pending)?;
        self.pending.clear();
        Ok(())
    }
}

/// Reads bits MSB-first from an underlying byte source.
///
/// Exhaustion is not an error: `read_bits` returns `Ok(None)` when the
/// source ends before the requested number of bits is available. Padding
/// bits at the end of the source are indistinguishable from data.
///
/// Reads one byte at a time from `inner`; wrap files in a `BufReader`.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    inner: R,
    /// Current byte being consumed
    current: u8,
    /// Bits of `current` not yet consumed (0-8)
    bits_left: u8,
    bits_read: u64,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Create a new BitReader over `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            current: 0,
            bits_left: 0,
            bits_read: 0,
            exhausted: false,
        }
    }

    /// Read up to 64 bits from the input.
    ///
    /// Bits are read MSB-first. For example, reading 3 bits from byte 0b10110000
    /// returns 0b101.
    ///
    /// # Returns
    /// - `Some(value)` with the next `count` bits
    /// - `None` if the source ended before `count` bits were available
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `Error::Io` if the underlying source fails
    pub fn read_bits(&mut self, count: usize) -> Result<Option<u64>> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut result = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            if self.bits_left == 0 && !self.fill()? {
                return Ok(None);
            }

            let bits_to_read = remaining.min(self.bits_left as usize);
            let shift = self.bits_left as usize - bits_to_read;
            let mask = ((1u16 << bits_to_read) - 1) as u8;
            let bits = (self.current >> shift) & mask;

            result = (result << bits_to_read) | bits as u64;

            self.bits_left -= bits_to_read as u8;
            self.bits_read += bits_to_read as u64;
            remaining -= bits_to_read;
        }

        Ok(Some(result))
    }

    /// Read a single bit, or `None` at end of stream.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        Ok(self.read_bits(1)?.map(|bit| bit == 1))
    }

    /// Return the number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Load the next byte. Returns false once the source is exhausted.
    fn fill(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }

        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(false);
                }
                Ok(_) => {
                    self.current = byte[0];
                    self.bits_left = 8;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
