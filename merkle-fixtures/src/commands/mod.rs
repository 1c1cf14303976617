//! Command handlers

pub mod proof;
pub mod tree;
pub mod verify;

use anyhow::{ensure, Result};
use merkle_standard::{hash_pair, HashValue, ProofTree};

/// An internal node that passes as a leaf under raw keccak leaves: the parent
/// of leaves 0 and 1, which are siblings in both layouts.
pub(crate) fn no_such_leaf(tree: &dyn ProofTree) -> Result<HashValue> {
    ensure!(tree.len() >= 2, "No internal node exists in a single-leaf tree");
    Ok(hash_pair(&tree.leaf(0)?, &tree.leaf(1)?))
}
