//! Compressed file header.
//!
//! The header carries the full frequency table so the decoder can rebuild
//! the encoder's exact tree. It is the same size for every file.
//!
//! # Header Format
//!
//! ```text
//! +---------------------------+
//! | Magic (32 bits)           |  0xFACE8200
//! +---------------------------+
//! | count[0] (32 bits)        |
//! | count[1] (32 bits)        |  one count per data symbol,
//! | ...                       |  ascending symbol order
//! | count[255] (32 bits)      |
//! +---------------------------+
//! | Terminator (32 bits)      |  0x7A7A7A7A
//! +---------------------------+
//! | content bitstream ...     |  not byte aligned after this point
//! ```
//!
//! All fields are MSB-first. The `PSEUDO_EOF` count is implicit and not
//! stored.

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::error::{FormatError, Result};
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};

/// Magic number identifying a huffpack file.
pub const MAGIC_NUMBER: u32 = 0xFACE_8200;

/// Sentinel marking the end of the frequency section.
pub const SECTION_TERMINATOR: u32 = 0x7A7A_7A7A;

/// Width of the magic, the terminator and every count.
pub const BITS_PER_INT: usize = 32;

/// Total header size in bits.
pub const HEADER_BITS: u64 = ((ALPHABET_SIZE + 2) * BITS_PER_INT) as u64;

/// Write the header for `frequencies`.
///
/// Returns the number of bits written (always `HEADER_BITS`).
pub fn write_header<W: Write>(writer: &mut BitWriter<W>, frequencies: &FrequencyTable) -> Result<u64> {
    writer.write_bits(MAGIC_NUMBER as u64, BITS_PER_INT)?;
    for &count in frequencies.counts() {
        writer.write_bits(count as u64, BITS_PER_INT)?;
    }
    writer.write_bits(SECTION_TERMINATOR as u64, BITS_PER_INT)?;
    Ok(HEADER_BITS)
}

/// Read and validate a header, returning its frequency table.
///
/// # Errors
/// - `FormatError::BadMagic` if the first word is not `MAGIC_NUMBER`
/// - `FormatError::TruncatedHeader` if the stream ends inside the header
/// - `FormatError::BadTerminator` if the word after the counts is wrong
pub fn read_header<R: Read>(reader: &mut BitReader<R>) -> Result<FrequencyTable> {
    let magic = read_int(reader)?;
    if magic != MAGIC_NUMBER {
        return Err(FormatError::BadMagic {
            expected: MAGIC_NUMBER,
            actual: magic,
        }
        .into());
    }

    let mut counts = [0u32; ALPHABET_SIZE];
    for count in counts.iter_mut() {
        *count = read_int(reader)?;
    }

    let terminator = read_int(reader)?;
    if terminator != SECTION_TERMINATOR {
        return Err(FormatError::BadTerminator {
            expected: SECTION_TERMINATOR,
            actual: terminator,
        }
        .into());
    }

    Ok(FrequencyTable::from_counts(counts))
}

fn read_int<R: Read>(reader: &mut BitReader<R>) -> Result<u32> {
    match reader.read_bits(BITS_PER_INT)? {
        Some(value) => Ok(value as u32),
        None => Err(FormatError::TruncatedHeader {
            bits_read: reader.bits_read(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn header_bytes(frequencies: &FrequencyTable) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        let written = write_header(&mut writer, frequencies).unwrap();
        assert_eq!(written, writer.bit_len());
        writer.finish().unwrap()
    }

    #[test]
    fn test_header_round_trip() {
        let frequencies = FrequencyTable::from_bytes(b"hello world! this is a header test.").unwrap();
        let bytes = header_bytes(&frequencies);

        let mut reader = BitReader::new(&bytes[..]);
        let decoded = read_header(&mut reader).unwrap();
        assert_eq!(decoded, frequencies);
        assert_eq!(reader.bits_read(), HEADER_BITS);
    }

    #[test]
    fn test_fixed_size() {
        let empty = header_bytes(&FrequencyTable::new());
        let full = header_bytes(&FrequencyTable::from_bytes(&(0..=255).collect::<Vec<u8>>()).unwrap());

        assert_eq!(empty.len() as u64 * 8, HEADER_BITS);
        assert_eq!(full.len(), empty.len());
    }

    #[test]
    fn test_layout() {
        let mut counts = [0u32; ALPHABET_SIZE];
        counts[0] = 0x0102_0304;
        counts[255] = 9;
        let bytes = header_bytes(&FrequencyTable::from_counts(counts));

        assert_eq!(&bytes[0..4], &MAGIC_NUMBER.to_be_bytes());
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
        assert_eq!(&bytes[1024..1028], &9u32.to_be_bytes());
        assert_eq!(&bytes[1028..1032], &SECTION_TERMINATOR.to_be_bytes());
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = header_bytes(&FrequencyTable::new());
        bytes[0] ^= 0xFF;

        let result = read_header(&mut BitReader::new(&bytes[..]));
        assert!(matches!(result, Err(Error::Format(FormatError::BadMagic { .. }))));
    }

    #[test]
    fn test_bad_terminator() {
        let mut bytes = header_bytes(&FrequencyTable::new());
        let last = bytes.len() - 1;
        bytes[last] = 0;

        let result = read_header(&mut BitReader::new(&bytes[..]));
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::BadTerminator { actual: 0x7A7A_7A00, .. }))
        ));
    }

    #[test]
    fn test_truncated() {
        let bytes = header_bytes(&FrequencyTable::new());

        let result = read_header(&mut BitReader::new(&bytes[..100]));
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::TruncatedHeader { .. }))
        ));
    }

    #[test]
    fn test_empty_stream_is_truncated() {
        let result = read_header(&mut BitReader::new(&[0u8; 0][..]));
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::TruncatedHeader { bits_read: 0 }))
        ));
    }
}
