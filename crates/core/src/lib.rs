//! huffpack-core: lossless file compression with Huffman coding
//!
//! This library provides the codec behind the `huffpack` tool:
//! - Counts byte frequencies over a full input pass
//! - Builds a Huffman tree with a deterministic tie-break
//! - Derives a bidirectional, prefix-free code table
//! - Writes a self-describing header so the decoder can rebuild the same tree
//! - Streams content through bit-level readers and writers
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bitio`: Low-level bit reading/writing over `Read`/`Write`
//! - `frequency`: Symbol alphabet and frequency table
//! - `tree`: Huffman tree builder
//! - `code_table`: Symbol <-> code mapping
//! - `header`: Magic number, frequency section, terminator
//! - `transcoder`: Content encode/decode
//! - `engine`: Compress/uncompress passes and measured sizes
//! - `processor`: Front-end mediator and the size regression policy
//! - `progress`: Status notifications
//! - `metrics`: Per-operation sizes and timing
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and scoped to one operation
//! - **Deterministic**: The same input always compresses to the same bytes
//! - **Streaming**: Inputs and outputs are any `Read`/`Write`
//! - **Observable**: Progress strings and metrics for every operation

pub mod bitio;
pub mod code_table;
pub mod engine;
pub mod error;
pub mod frequency;
pub mod header;
pub mod metrics;
pub mod processor;
pub mod progress;
pub mod transcoder;
pub mod tree;

// Re-export commonly used types
pub use engine::HuffEngine;
pub use error::{Error, Result};
pub use frequency::{FrequencyTable, Symbol, ALPHABET_SIZE, BITS_PER_WORD, PSEUDO_EOF};
pub use processor::{compress_bytes, uncompress_bytes, Processor};
pub use progress::ProgressSink;
