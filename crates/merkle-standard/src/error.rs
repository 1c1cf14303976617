//! Error types for tree construction, proof generation and verification.

use thiserror::Error;

use crate::HashValue;

/// Errors raised by the Merkle tree.
///
/// Construction and generation errors abort the operation. Verification only
/// errors on structurally malformed input; a well-formed proof that does not
/// reproduce the root is reported as `Ok(false)`, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    #[error("Cannot build a Merkle tree from zero leaves")]
    EmptyInput,

    #[error("Leaf index {index} out of range for tree with {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Leaf index {0} requested more than once")]
    DuplicateIndex(usize),

    #[error("Multiproof requested for an empty index set")]
    EmptyIndexSet,

    #[error("Leaf {0} is not part of the tree")]
    LeafNotFound(HashValue),

    #[error("Proof flag count mismatch: got {flags}, expected {expected}")]
    FlagLengthMismatch { flags: usize, expected: usize },

    #[error("Proof data not fully consumed: used {consumed} of {len} elements")]
    UnconsumedProofData { consumed: usize, len: usize },

    #[error("Proof flags require more proof elements than supplied")]
    InsufficientProofData,

    #[error("Proof flags require more hashes than leaves and intermediate nodes supply")]
    InsufficientHashes,

    #[error("Multiproof carries no leaves")]
    EmptyLeafSet,

    #[error("Invalid hash length: expected {expected}, got {got}")]
    InvalidHashLength { expected: usize, got: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MerkleError {
    /// True for errors describing a malformed multiproof presented to the verifier.
    pub fn is_malformed_proof(&self) -> bool {
        matches!(
            self,
            MerkleError::FlagLengthMismatch { .. }
                | MerkleError::UnconsumedProofData { .. }
                | MerkleError::InsufficientProofData
                | MerkleError::InsufficientHashes
                | MerkleError::EmptyLeafSet
        )
    }
}

pub type MerkleResult<T> = std::result::Result<T, MerkleError>;
