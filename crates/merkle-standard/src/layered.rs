//! Level-by-level Merkle tree.
//!
//! Each level is hashed pairwise from the left. A node left without a partner
//! at the end of a level is appended unchanged to the end of the next level.
//! This is the shape produced by the common JavaScript `MerkleTree` builder
//! with `sortPairs` set, so roots and single proofs match fixtures generated
//! with it.
//!
//! The carried node lands at the end of its new level rather than the front,
//! so known nodes are not consumed in a single FIFO order. Multiproofs are
//! therefore only produced by the heap-shaped [`MerkleTree`](crate::MerkleTree).
//! For power-of-two leaf counts the two shapes coincide.

use tracing::debug;

use crate::encoding::LeafEncoding;
use crate::error::{MerkleError, MerkleResult};
use crate::hash::{hash_pair, HashValue};
use crate::proof::MerkleProof;
use crate::tree::TreeOptions;

/// A Merkle tree stored as one vector per level, leaves first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayeredTree {
    levels: Vec<Vec<HashValue>>,
}

impl LayeredTree {
    /// Build a tree from leaf hashes in the given order.
    pub fn build(leaves: Vec<HashValue>) -> MerkleResult<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let mut levels = vec![leaves];
        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let next = level
                .chunks(2)
                .map(|pair| match pair.get(1) {
                    Some(right) => hash_pair(&pair[0], right),
                    None => pair[0],
                })
                .collect();
            levels.push(next);
        }

        let tree = Self { levels };
        debug!(leaves = tree.len(), root = %tree.root(), "Built layered merkle tree");
        Ok(tree)
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
        Self::build(leaves)
    }

    pub fn root(&self) -> HashValue {
        // build never stores an empty level
        self.levels[self.levels.len() - 1][0]
    }

    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    /// Always false: a tree holds at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn leaf(&self, index: usize) -> MerkleResult<HashValue> {
        self.levels[0]
            .get(index)
            .copied()
            .ok_or(MerkleError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn leaves(&self) -> impl Iterator<Item = &HashValue> + '_ {
        self.levels[0].iter()
    }

    pub fn position_of(&self, leaf: &HashValue) -> Option<usize> {
        self.leaves().position(|l| l == leaf)
    }

    /// Authentication path for the leaf at `index`, ordered leaf to root.
    ///
    /// Levels where the node was carried up without a partner contribute no
    /// sibling.
    pub fn prove(&self, index: usize) -> MerkleResult<MerkleProof> {
        self.leaf(index)?;

        let mut siblings = Vec::with_capacity(self.depth());
        let mut position = index;
        for level in &self.levels[..self.depth()] {
            let pair = position ^ 1;
            if let Some(sibling) = level.get(pair) {
                siblings.push(*sibling);
            }
            position /= 2;
        }

        Ok(MerkleProof::new(siblings))
    }

    pub fn prove_leaf(&self, leaf: &HashValue) -> MerkleResult<MerkleProof> {
        let index = self
            .position_of(leaf)
            .ok_or(MerkleError::LeafNotFound(*leaf))?;
        self.prove(index)
    }
}
