//! Huffman tree construction.
//!
//! The tree is built bottom-up from a forest of leaves using a min-priority
//! queue. Encoder and decoder run this same procedure on the same frequency
//! table, so the result must be bit-for-bit reproducible.
//!
//! # Tie-breaking
//!
//! Nodes are ordered by weight, then by insertion order. Leaves are inserted
//! in ascending symbol order, the `PSEUDO_EOF` leaf after them, and every
//! internal node as it is created. The first node extracted becomes the
//! left child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::frequency::{FrequencyTable, Symbol, ALPHABET_SIZE, PSEUDO_EOF};

/// A node of the Huffman tree.
///
/// Internal nodes exclusively own their two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn leaf(symbol: Symbol, weight: u64) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new internal node; `left` is the lighter
    /// (first extracted) one.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// A forest entry with its priority key.
#[derive(Debug)]
struct Pending {
    weight: u64,
    order: u64,
    node: HuffmanNode,
}

// Implement ordering for the heap (min-heap: lightest, then oldest, first)
impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.order == other.order
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        (other.weight, other.order).cmp(&(self.weight, self.order))
    }
}

/// Min-priority forest that stamps each node with its insertion order.
struct Forest {
    heap: BinaryHeap<Pending>,
    next_order: u64,
}

impl Forest {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::with_capacity(ALPHABET_SIZE + 1),
            next_order: 0,
        }
    }

    fn push(&mut self, node: HuffmanNode) {
        self.heap.push(Pending {
            weight: node.weight(),
            order: self.next_order,
            node,
        });
        self.next_order += 1;
    }

    fn pop_min(&mut self) -> Option<HuffmanNode> {
        self.heap.pop().map(|pending| pending.node)
    }
}

/// A Huffman tree whose leaves are the symbols present in a frequency
/// table plus `PSEUDO_EOF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for `frequencies`.
    ///
    /// Same table in, same tree out. With no symbols present the root is the
    /// lone `PSEUDO_EOF` leaf.
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let mut forest = Forest::new();
        for (symbol, count) in frequencies.present() {
            forest.push(HuffmanNode::leaf(symbol, count as u64));
        }
        forest.push(HuffmanNode::leaf(PSEUDO_EOF, 1));

        let root = loop {
            let Some(first) = forest.pop_min() else {
                // Not reachable: the PSEUDO_EOF leaf keeps the forest non-empty.
                break HuffmanNode::leaf(PSEUDO_EOF, 1);
            };
            match forest.pop_min() {
                Some(second) => forest.push(HuffmanNode::merge(first, second)),
                None => break first,
            }
        };

        Self { root }
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Number of leaves (distinct symbols including `PSEUDO_EOF`).
    pub fn leaf_count(&self) -> usize {
        fn count(node: &HuffmanNode) -> usize {
            match node {
                HuffmanNode::Leaf { .. } => 1,
                HuffmanNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth(node: &HuffmanNode) -> usize {
            match node {
                HuffmanNode::Leaf { .. } => 0,
                HuffmanNode::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        depth(&self.root)
    }
}
