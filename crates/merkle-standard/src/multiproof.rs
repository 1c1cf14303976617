//! Multiproof generation.
//!
//! The generator runs the same FIFO walk the verifier will replay. Known
//! nodes are kept in descending array index; at each step the front node
//! either finds its sibling next in the queue (flag `true`) or takes the
//! sibling from the tree and records it in `proof` (flag `false`). The parent
//! is appended to the back. The walk ends when the root is at the front.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::{MerkleError, MerkleResult};
use crate::proof::MultiProof;
use crate::tree::{parent, sibling, MerkleTree};

impl MerkleTree {
    /// Build a multiproof for the leaves at `indices`.
    ///
    /// The returned leaves follow tree order regardless of the order of
    /// `indices`, so two requests for the same set produce identical proofs.
    pub fn prove_many(&self, indices: &[usize]) -> MerkleResult<MultiProof> {
        if indices.is_empty() {
            return Err(MerkleError::EmptyIndexSet);
        }

        let mut known = Vec::with_capacity(indices.len());
        for &index in indices {
            self.check_index(index)?;
            known.push(self.leaf_node(index));
        }
        known.sort_unstable_by(|a, b| b.cmp(a));

        if let Some(pair) = known.windows(2).find(|pair| pair[0] == pair[1]) {
            // leaf_node maps array index back to leaf position as well.
            return Err(MerkleError::DuplicateIndex(self.leaf_node(pair[0])));
        }

        let leaves = known.iter().map(|&k| *self.node(k)).collect();

        let mut queue: VecDeque<usize> = known.into();
        let mut proof = Vec::new();
        let mut proof_flags = Vec::with_capacity(queue.len() + self.depth());

        while let Some(k) = queue.pop_front() {
            if k == 0 {
                break;
            }
            let s = sibling(k);
            if queue.front() == Some(&s) {
                queue.pop_front();
                proof_flags.push(true);
            } else {
                proof.push(*self.node(s));
                proof_flags.push(false);
            }
            queue.push_back(parent(k));
        }

        debug!(
            requested = indices.len(),
            proof_len = proof.len(),
            flags = proof_flags.len(),
            "Generated multiproof"
        );

        Ok(MultiProof::new(leaves, proof, proof_flags))
    }
}
