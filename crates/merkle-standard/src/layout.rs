//! Tree shape selection.
//!
//! Both shapes hash pairs the same way and differ only in where a node left
//! without a partner is carried. Single-leaf proofs work over either through
//! [`ProofTree`]; multiproofs need the heap shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::encoding::LeafEncoding;
use crate::error::{MerkleError, MerkleResult};
use crate::hash::HashValue;
use crate::layered::LayeredTree;
use crate::proof::MerkleProof;
use crate::tree::{MerkleTree, TreeOptions};

/// Where an unpaired node goes in the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeLayout {
    /// Front of the next round; flat array, supports multiproofs.
    #[default]
    Heap,
    /// End of the next level.
    Layered,
}

impl TreeLayout {
    /// Build a tree of this shape over `values`.
    pub fn build<V: AsRef<[u8]>>(
        &self,
        values: &[V],
        encoding: &dyn LeafEncoding,
        options: TreeOptions,
    ) -> MerkleResult<Box<dyn ProofTree>> {
        Ok(match self {
            TreeLayout::Heap => Box::new(MerkleTree::from_values(values, encoding, options)?),
            TreeLayout::Layered => Box::new(LayeredTree::from_values(values, encoding, options)?),
        })
    }
}

impl fmt::Display for TreeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TreeLayout::Heap => "heap",
            TreeLayout::Layered => "layered",
        })
    }
}

impl FromStr for TreeLayout {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heap" => Ok(TreeLayout::Heap),
            "layered" => Ok(TreeLayout::Layered),
            other => Err(MerkleError::InvalidInput(format!(
                "Unknown tree layout: {}",
                other
            ))),
        }
    }
}

/// Single-leaf proof operations shared by both tree shapes.
pub trait ProofTree: Send + Sync {
    fn layout(&self) -> TreeLayout;
    fn root(&self) -> HashValue;
    fn len(&self) -> usize;
    fn leaf(&self, index: usize) -> MerkleResult<HashValue>;
    fn position_of(&self, leaf: &HashValue) -> Option<usize>;
    fn prove(&self, index: usize) -> MerkleResult<MerkleProof>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prove_leaf(&self, leaf: &HashValue) -> MerkleResult<MerkleProof> {
        let index = self
            .position_of(leaf)
            .ok_or(MerkleError::LeafNotFound(*leaf))?;
        self.prove(index)
    }
}

impl ProofTree for MerkleTree {
    fn layout(&self) -> TreeLayout {
        TreeLayout::Heap
    }

    fn root(&self) -> HashValue {
        MerkleTree::root(self)
    }

    fn len(&self) -> usize {
        MerkleTree::len(self)
    }

    fn leaf(&self, index: usize) -> MerkleResult<HashValue> {
        MerkleTree::leaf(self, index)
    }

    fn position_of(&self, leaf: &HashValue) -> Option<usize> {
        MerkleTree::position_of(self, leaf)
    }

    fn prove(&self, index: usize) -> MerkleResult<MerkleProof> {
        MerkleTree::prove(self, index)
    }
}

impl ProofTree for LayeredTree {
    fn layout(&self) -> TreeLayout {
        TreeLayout::Layered
    }

    fn root(&self) -> HashValue {
        LayeredTree::root(self)
    }

    fn len(&self) -> usize {
        LayeredTree::len(self)
    }

    fn leaf(&self, index: usize) -> MerkleResult<HashValue> {
        LayeredTree::leaf(self, index)
    }

    fn position_of(&self, leaf: &HashValue) -> Option<usize> {
        LayeredTree::position_of(self, leaf)
    }

    fn prove(&self, index: usize) -> MerkleResult<MerkleProof> {
        LayeredTree::prove(self, index)
    }
}
