//! Static Merkle tree over an ordered list of leaf hashes.
//!
//! # Layout
//!
//! The tree over `n` leaves is a flat array of `2n - 1` nodes. The root sits
//! at index 0, the children of node `k` at `2k + 1` and `2k + 2`, and leaf
//! position `i` at index `2n - 2 - i`.
//!
//! Filling the array from the highest internal index down is the same as the
//! round-based construction: leaves are hashed pairwise in order, and a node
//! left without a partner at the end of a round is carried unchanged into the
//! next round, where it pairs with the first parent produced. Nothing is ever
//! duplicated to balance a level.
//!
//! ```text
//!   n = 3:            root [0]
//!                    /        \
//!             h(a,b) [1]      c [2]
//!              /     \
//!          b [3]     a [4]
//! ```
//!
//! Consuming nodes strictly in descending array index is a FIFO walk, which
//! is what lets a multiproof be replayed with a single queue.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encoding::LeafEncoding;
use crate::error::{MerkleError, MerkleResult};
use crate::hash::{hash_pair, HashValue};
use crate::proof::MerkleProof;

/// Options applied when building a tree from application values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeOptions {
    /// Sort leaf hashes ascending before building. Makes the root independent
    /// of value order; leaf positions then follow the sorted order.
    pub sort_leaves: bool,
}

impl TreeOptions {
    pub fn sorted() -> Self {
        Self { sort_leaves: true }
    }
}

/// An immutable Merkle tree with sorted-pair hashing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    nodes: Vec<HashValue>,
    leaf_count: usize,
}

impl MerkleTree {
    /// Build a tree from leaf hashes in the given order.
    pub fn build(leaves: Vec<HashValue>) -> MerkleResult<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let leaf_count = leaves.len();
        let last = 2 * leaf_count - 2;
        let mut nodes = vec![HashValue::ZERO; last + 1];

        for (i, leaf) in leaves.into_iter().enumerate() {
            nodes[last - i] = leaf;
        }
        for k in (0..leaf_count - 1).rev() {
            nodes[k] = hash_pair(&nodes[left_child(k)], &nodes[left_child(k) + 1]);
        }

        debug!(leaves = leaf_count, root = %nodes[0], "Built merkle tree");

        Ok(Self { nodes, leaf_count })
    }

    /// Hash `values` with `encoding` and build a tree over the results.
    pub fn from_values<V: AsRef<[u8]>>(
        values: &[V],
        encoding: &dyn LeafEncoding,
        options: TreeOptions,
    ) -> MerkleResult<Self> {
        let mut leaves: Vec<HashValue> = values
            .iter()
            .map(|v| encoding.leaf_hash(v.as_ref()))
            .collect();

        if options.sort_leaves {
            leaves.sort();
        }

        debug!(
            encoding = encoding.name(),
            sorted = options.sort_leaves,
            "Hashed {} leaf values",
            leaves.len()
        );

        Self::build(leaves)
    }

    /// Get the root hash.
    pub fn root(&self) -> HashValue {
        self.nodes[0]
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaf_count
    }

    /// Always false: a tree holds at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    /// Number of hashing steps from the deepest leaf to the root.
    pub fn depth(&self) -> usize {
        (usize::BITS - self.nodes.len().leading_zeros() - 1) as usize
    }

    /// Leaf hash at a position.
    pub fn leaf(&self, index: usize) -> MerkleResult<HashValue> {
        self.check_index(index)?;
        Ok(self.nodes[self.leaf_node(index)])
    }

    /// Leaf hashes in leaf order.
    pub fn leaves(&self) -> impl Iterator<Item = &HashValue> + '_ {
        self.nodes[self.leaf_count - 1..].iter().rev()
    }

    /// Position of the first leaf equal to `leaf`.
    pub fn position_of(&self, leaf: &HashValue) -> Option<usize> {
        self.leaves().position(|l| l == leaf)
    }

    /// Authentication path for the leaf at `index`, ordered leaf to root.
    pub fn prove(&self, index: usize) -> MerkleResult<MerkleProof> {
        self.check_index(index)?;

        let mut siblings = Vec::with_capacity(self.depth());
        let mut k = self.leaf_node(index);
        while k > 0 {
            siblings.push(self.nodes[sibling(k)]);
            k = parent(k);
        }

        Ok(MerkleProof::new(siblings))
    }

    /// Authentication path for a leaf looked up by its hash.
    pub fn prove_leaf(&self, leaf: &HashValue) -> MerkleResult<MerkleProof> {
        let index = self
            .position_of(leaf)
            .ok_or(MerkleError::LeafNotFound(*leaf))?;
        self.prove(index)
    }

    pub(crate) fn check_index(&self, index: usize) -> MerkleResult<()> {
        if index >= self.leaf_count {
            return Err(MerkleError::IndexOutOfRange {
                index,
                len: self.leaf_count,
            });
        }
        Ok(())
    }

    /// Array index of leaf position `index`.
    pub(crate) fn leaf_node(&self, index: usize) -> usize {
        self.nodes.len() - 1 - index
    }

    pub(crate) fn node(&self, k: usize) -> &HashValue {
        &self.nodes[k]
    }
}

pub(crate) fn left_child(k: usize) -> usize {
    2 * k + 1
}

pub(crate) fn parent(k: usize) -> usize {
    (k - 1) / 2
}

pub(crate) fn sibling(k: usize) -> usize {
    if k % 2 == 1 {
        k + 1
    } else {
        k - 1
    }
}
