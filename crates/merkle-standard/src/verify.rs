//! Proof verification.
//!
//! Single proofs fold siblings onto the leaf. Multiproofs replay the flags
//! over one FIFO queue seeded with the leaves: every step pops the front
//! hash, pairs it with either the next queued hash (`true`) or the next
//! proof element (`false`), and appends the parent.
//!
//! Structural problems (wrong flag count, proof elements the flags never
//! read or read past the end) are rejected before any hashing. A
//! structurally sound proof that lands on a different root is a plain
//! `false`.

use std::collections::VecDeque;

use tracing::warn;

use crate::error::{MerkleError, MerkleResult};
use crate::hash::{hash_pair, HashValue};

/// Root reached by folding `proof` onto `leaf`.
pub fn process_proof(leaf: &HashValue, proof: &[HashValue]) -> HashValue {
    proof
        .iter()
        .fold(*leaf, |current, sibling| hash_pair(&current, sibling))
}

/// Check a single-leaf proof against `root`.
///
/// The fold always runs to the end; only the final comparison decides.
pub fn verify_proof(root: &HashValue, leaf: &HashValue, proof: &[HashValue]) -> bool {
    process_proof(leaf, proof) == *root
}

/// Root reconstructed from a multiproof.
pub fn process_multi_proof(
    leaves: &[HashValue],
    proof: &[HashValue],
    proof_flags: &[bool],
) -> MerkleResult<HashValue> {
    let inputs = leaves.len() + proof.len();
    if inputs == 0 {
        return Err(MerkleError::EmptyLeafSet);
    }
    if proof_flags.len() != inputs - 1 {
        return Err(MerkleError::FlagLengthMismatch {
            flags: proof_flags.len(),
            expected: inputs - 1,
        });
    }
    if leaves.is_empty() {
        return Err(MerkleError::EmptyLeafSet);
    }

    // Every `false` flag reads one proof element.
    let proof_reads = proof_flags.iter().filter(|flag| !**flag).count();
    if proof_reads > proof.len() {
        return Err(MerkleError::InsufficientProofData);
    }
    if proof_reads < proof.len() {
        return Err(MerkleError::UnconsumedProofData {
            consumed: proof_reads,
            len: proof.len(),
        });
    }

    let mut queue: VecDeque<HashValue> = VecDeque::with_capacity(leaves.len() + proof_flags.len());
    queue.extend(leaves.iter().copied());
    let mut proof_pos = 0;

    for &flag in proof_flags {
        let a = queue.pop_front().ok_or(MerkleError::InsufficientHashes)?;
        let b = if flag {
            queue.pop_front().ok_or(MerkleError::InsufficientHashes)?
        } else {
            let next = proof.get(proof_pos).ok_or(MerkleError::InsufficientProofData)?;
            proof_pos += 1;
            *next
        };
        queue.push_back(hash_pair(&a, &b));
    }

    // Both counts checked above, so exactly one hash is left.
    queue.pop_front().ok_or(MerkleError::InsufficientHashes)
}

/// Check a multiproof against `root`.
pub fn verify_multi_proof(
    root: &HashValue,
    leaves: &[HashValue],
    proof: &[HashValue],
    proof_flags: &[bool],
) -> MerkleResult<bool> {
    match process_multi_proof(leaves, proof, proof_flags) {
        Ok(computed) => Ok(computed == *root),
        Err(e) => {
            warn!(
                leaves = leaves.len(),
                proof = proof.len(),
                flags = proof_flags.len(),
                "Rejected malformed multiproof: {}",
                e
            );
            Err(e)
        }
    }
}
