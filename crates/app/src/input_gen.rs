//! Sample input generation.
//!
//! When `compress` or `roundtrip` runs without `--in`, the input is generated
//! from the seed. Huffman coding only sees byte frequencies, so the sample is
//! built from blocks with different frequency shapes:
//! - prose-like text with a skewed letter distribution
//! - long runs of a single byte
//! - a narrow alphabet of a few symbols
//! - uniform noise over all 256 byte values
//!
//! The blend usually compresses, but noise-heavy seeds show the size
//! regression path as well.

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Largest block of one shape.
const BLOCK_BYTES: usize = 4096;

/// Letters with rough English frequencies (per mille).
const PROSE_LETTERS: &[(u8, u32)] = &[
    (b' ', 180),
    (b'e', 102),
    (b't', 75),
    (b'a', 65),
    (b'o', 62),
    (b'i', 57),
    (b'n', 57),
    (b's', 53),
    (b'h', 50),
    (b'r', 50),
    (b'd', 35),
    (b'l', 33),
    (b'u', 23),
    (b'c', 22),
    (b'm', 20),
    (b'w', 19),
    (b'f', 18),
    (b'g', 16),
    (b'y', 16),
    (b'p', 15),
    (b'b', 12),
    (b',', 10),
    (b'.', 9),
    (b'v', 8),
    (b'k', 6),
    (b'\n', 5),
    (b'x', 2),
    (b'j', 1),
    (b'q', 1),
    (b'z', 1),
];

/// Frequency shape of one generated block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockShape {
    Prose,
    Run,
    NarrowAlphabet,
    Noise,
}

impl BlockShape {
    fn pick(rng: &mut ChaCha8Rng) -> Self {
        match rng.gen_range(0..20) {
            0..=8 => BlockShape::Prose,
            9..=12 => BlockShape::Run,
            13..=16 => BlockShape::NarrowAlphabet,
            _ => BlockShape::Noise,
        }
    }
}

/// Generate `size_bytes` of sample data, fully determined by `seed`.
pub fn generate_sample(seed: u64, size_bytes: usize) -> Result<Vec<u8>, WeightedError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let prose = WeightedIndex::new(PROSE_LETTERS.iter().map(|&(_, weight)| weight))?;

    while data.len() < size_bytes {
        let block = (size_bytes - data.len()).min(rng.gen_range(BLOCK_BYTES / 4..=BLOCK_BYTES));

        match BlockShape::pick(&mut rng) {
            BlockShape::Prose => {
                data.extend((0..block).map(|_| PROSE_LETTERS[prose.sample(&mut rng)].0));
            }
            BlockShape::Run => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(block));
            }
            BlockShape::NarrowAlphabet => {
                let width = rng.gen_range(2..=6);
                let alphabet: Vec<u8> = (0..width).map(|_| rng.gen()).collect();
                data.extend((0..block).map(|_| alphabet[rng.gen_range(0..alphabet.len())]));
            }
            BlockShape::Noise => {
                data.extend((0..block).map(|_| rng.gen::<u8>()));
            }
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_size() {
        for size in [0, 1, 100, 4096, 10_000, 100_000] {
            assert_eq!(generate_sample(999, size).unwrap().len(), size);
        }
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate_sample(12345, 50_000).unwrap(), generate_sample(12345, 50_000).unwrap());
    }

    #[test]
    fn test_different_seeds() {
        assert_ne!(generate_sample(1, 5000).unwrap(), generate_sample(2, 5000).unwrap());
    }

    #[test]
    fn test_sample_round_trips() {
        let data = generate_sample(42, 64 * 1024).unwrap();
        let packed = huffpack_core::compress_bytes(&data, true).unwrap();
        assert_eq!(huffpack_core::uncompress_bytes(&packed).unwrap(), data);
    }
}
