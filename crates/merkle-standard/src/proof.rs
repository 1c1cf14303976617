//! Proof artifacts handed to callers and verifiers.

use serde::{Deserialize, Serialize};

use crate::error::MerkleResult;
use crate::hash::HashValue;
use crate::verify::{process_multi_proof, process_proof};

/// Sibling hashes from a leaf up to the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    siblings: Vec<HashValue>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<HashValue>) -> Self {
        Self { siblings }
    }

    pub fn siblings(&self) -> &[HashValue] {
        &self.siblings
    }

    pub fn into_siblings(self) -> Vec<HashValue> {
        self.siblings
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Root reached by folding this proof onto `leaf`.
    pub fn compute_root(&self, leaf: &HashValue) -> HashValue {
        process_proof(leaf, &self.siblings)
    }

    /// Check that `leaf` is committed under `root`.
    pub fn verify(&self, root: &HashValue, leaf: &HashValue) -> bool {
        self.compute_root(leaf) == *root
    }
}

/// Proof for several leaves at once.
///
/// `leaves` are in tree order, which is the order the verifier consumes them.
/// `proof_flags[i]` is `true` when step `i` merges two pending hashes and
/// `false` when it merges one pending hash with the next `proof` element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiProof {
    pub leaves: Vec<HashValue>,
    pub proof: Vec<HashValue>,
    pub proof_flags: Vec<bool>,
}

impl MultiProof {
    pub fn new(leaves: Vec<HashValue>, proof: Vec<HashValue>, proof_flags: Vec<bool>) -> Self {
        Self {
            leaves,
            proof,
            proof_flags,
        }
    }

    /// Replay the flags and return the reconstructed root.
    pub fn compute_root(&self) -> MerkleResult<HashValue> {
        process_multi_proof(&self.leaves, &self.proof, &self.proof_flags)
    }

    /// Check every leaf against `root`. Errors only on a malformed proof.
    pub fn verify(&self, root: &HashValue) -> MerkleResult<bool> {
        Ok(self.compute_root()? == *root)
    }
}
