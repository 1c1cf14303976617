//! # merkle-standard
//!
//! Static Merkle trees with sorted-pair hashing, single-leaf proofs and
//! multiproofs, producing the same roots, proofs and flag sequences the
//! canonical on-chain verifier (`verify` / `multiProofVerify`) accepts.
//!
//! ## Design
//!
//! - **Sorted pair hashing**: a parent is `keccak256(min(a, b) || max(a, b))`,
//!   so sibling order never matters and proofs carry no left/right bits.
//! - **No duplication**: an odd node is carried up unchanged and paired in a
//!   later round. See [`tree`] for the layout.
//! - **Pluggable leaves**: how values become leaf hashes is a
//!   [`LeafEncoding`]; raw keccak and the double-hashed ABI encoding ship here.
//! - **FIFO multiproofs**: generation and verification walk the same queue,
//!   so leaves are always emitted in tree order.
//! - **Two shapes**: the heap-shaped [`MerkleTree`] carries an odd node to the
//!   front of the next round and supports multiproofs; [`LayeredTree`] carries
//!   it to the end of the next level, matching JavaScript-built fixtures.
//!   [`TreeLayout`] picks one behind the [`ProofTree`] trait.
//!
//! A built [`MerkleTree`] is never mutated and can be shared across threads
//! without locking.
//!
//! ## Example
//!
//! ```
//! use merkle_standard::{MerkleTree, StandardEncoding, TreeOptions, verify_proof};
//!
//! let values = ["a", "b", "c", "d"];
//! let tree = MerkleTree::from_values(&values, &StandardEncoding, TreeOptions::default()).unwrap();
//!
//! let proof = tree.prove(2).unwrap();
//! assert!(verify_proof(&tree.root(), &tree.leaf(2).unwrap(), proof.siblings()));
//!
//! let multi = tree.prove_many(&[3, 0]).unwrap();
//! assert!(multi.verify(&tree.root()).unwrap());
//! ```

pub mod encoding;
pub mod error;
pub mod hash;
pub mod layered;
pub mod layout;
pub mod multiproof;
pub mod proof;
pub mod tree;
pub mod verify;

pub use encoding::{EncodingKind, LeafEncoding, RawKeccak, StandardEncoding};
pub use error::{MerkleError, MerkleResult};
pub use hash::{hash_pair, keccak256, HashValue};
pub use layered::LayeredTree;
pub use layout::{ProofTree, TreeLayout};
pub use proof::{MerkleProof, MultiProof};
pub use tree::{MerkleTree, TreeOptions};
pub use verify::{process_multi_proof, process_proof, verify_multi_proof, verify_proof};

/// The length of hash digests used in merkle trees (32 bytes = 256 bits)
pub const HASH_LENGTH: usize = 32;
