//! Bidirectional symbol <-> code mapping derived from a Huffman tree.
//!
//! Codes are root-to-leaf paths (`0` = left, `1` = right), so the table is
//! prefix-free by construction: no code can be a prefix of another because
//! every leaf is a distinct node and leaves have no descendants.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, Symbol, BITS_PER_WORD, PSEUDO_EOF};
use crate::tree::{HuffmanNode, HuffmanTree};

/// Longest code a `Code` can hold.
pub const MAX_CODE_LEN: usize = 64;

/// A variable-length bit sequence, stored right-aligned in a `u64`.
///
/// `len` distinguishes codes with the same numeric value, so `0` and `00`
/// are different codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// The zero-length code (only used by a tree whose root is a leaf).
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    /// Return this code extended by one bit.
    ///
    /// # Errors
    /// `HuffmanError::CodeLengthTooLong` if the result would exceed
    /// `MAX_CODE_LEN` bits.
    pub fn push(self, bit: bool) -> Result<Self> {
        let len = self.len as usize + 1;
        if len > MAX_CODE_LEN {
            return Err(HuffmanError::CodeLengthTooLong { length: len }.into());
        }
        Ok(Code {
            bits: (self.bits << 1) | bit as u64,
            len: len as u8,
        })
    }

    /// The code's bits, right-aligned.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        self.len == 0 || other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            f.write_str(if (self.bits >> i) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol -> code and code -> symbol views of one Huffman tree.
///
/// Built once per operation and immutable afterwards. Both views are only
/// ever updated together, by one `&mut self` insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    by_symbol: BTreeMap<Symbol, Code>,
    by_code: HashMap<Code, Symbol>,
}

impl CodeTable {
    /// Derive the code table for `tree`.
    ///
    /// The root's children start at `0` and `1`. A root that is itself a
    /// leaf (no data symbols) gets the empty code.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut table = CodeTable::default();
        match tree.root() {
            HuffmanNode::Leaf { symbol, .. } => table.insert(*symbol, Code::EMPTY),
            HuffmanNode::Internal { left, right, .. } => {
                table.traverse(left, Code::EMPTY.push(false)?)?;
                table.traverse(right, Code::EMPTY.push(true)?)?;
            }
        }
        Ok(table)
    }

    /// Convenience: build the tree for `frequencies` and derive its table.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        Self::from_tree(&HuffmanTree::build(frequencies))
    }

    fn traverse(&mut self, node: &HuffmanNode, path: Code) -> Result<()> {
        match node {
            HuffmanNode::Leaf { symbol, .. } => self.insert(*symbol, path),
            HuffmanNode::Internal { left, right, .. } => {
                self.traverse(left, path.push(false)?)?;
                self.traverse(right, path.push(true)?)?;
            }
        }
        Ok(())
    }

    fn insert(&mut self, symbol: Symbol, code: Code) {
        self.by_symbol.insert(symbol, code);
        self.by_code.insert(code, symbol);
    }

    /// Exact lookup from symbol to code.
    pub fn code_for(&self, symbol: Symbol) -> Option<Code> {
        self.by_symbol.get(&symbol).copied()
    }

    /// Exact lookup from a complete code to its symbol. A strict prefix of a
    /// code never matches.
    pub fn symbol_for(&self, code: &Code) -> Option<Symbol> {
        self.by_code.get(code).copied()
    }

    /// Code of the end-of-content marker (always present).
    pub fn eof_code(&self) -> Option<Code> {
        self.code_for(PSEUDO_EOF)
    }

    /// Number of symbols with a code, `PSEUDO_EOF` included.
    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Iterate `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Code)> + '_ {
        self.by_symbol.iter().map(|(&symbol, &code)| (symbol, code))
    }

    /// Content size in bits for data with these frequencies: every symbol's
    /// code, plus the end-of-content code once.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        let data: u64 = frequencies
            .present()
            .map(|(symbol, count)| {
                let len = self.code_for(symbol).map_or(0, |code| code.len());
                count as u64 * len as u64
            })
            .sum();
        data + self.eof_code().map_or(0, |code| code.len() as u64)
    }

    /// Size of the same data at the fixed word width.
    pub fn raw_bits(frequencies: &FrequencyTable) -> u64 {
        frequencies.total() * BITS_PER_WORD as u64
    }
}
