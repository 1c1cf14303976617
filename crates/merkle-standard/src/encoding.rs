//! Leaf encodings.
//!
//! How an application value becomes a leaf hash is a policy of the caller,
//! not of the tree. Two policies are provided:
//!
//! - [`RawKeccak`]: `keccak256(value)`. An internal node is the hash of 64
//!   bytes, so an internal node verifies as a leaf under this policy.
//! - [`StandardEncoding`]: `keccak256(keccak256(abi.encode(value)))` for a
//!   single `string`/`bytes` column. The second hash keeps every leaf
//!   pre-image at 32 bytes, disjoint from the 64-byte internal pre-images.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::hash::{keccak256, HashValue};
use crate::{MerkleError, HASH_LENGTH};

/// Maps an application value to its leaf hash.
pub trait LeafEncoding: Send + Sync {
    /// Hash an encoded leaf value.
    fn leaf_hash(&self, value: &[u8]) -> HashValue;

    /// Short name used in logs and configuration.
    fn name(&self) -> &'static str;
}

/// `keccak256(value)` with no further encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawKeccak;

impl LeafEncoding for RawKeccak {
    fn leaf_hash(&self, value: &[u8]) -> HashValue {
        keccak256(value)
    }

    fn name(&self) -> &'static str {
        "raw"
    }
}

/// Double-hashed ABI encoding of a single dynamic `string`/`bytes` value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEncoding;

impl LeafEncoding for StandardEncoding {
    fn leaf_hash(&self, value: &[u8]) -> HashValue {
        let inner = keccak256(&abi_encode_dynamic(value));
        keccak256(inner.as_bytes())
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

/// ABI-encode one dynamic `bytes`/`string` value as the sole tuple element:
/// offset word, length word, then the data right-padded to a word boundary.
pub fn abi_encode_dynamic(value: &[u8]) -> Vec<u8> {
    let padded = value.len().div_ceil(HASH_LENGTH) * HASH_LENGTH;
    let mut out = Vec::with_capacity(2 * HASH_LENGTH + padded);
    out.extend_from_slice(&abi_word(HASH_LENGTH as u64));
    out.extend_from_slice(&abi_word(value.len() as u64));
    out.extend_from_slice(value);
    out.resize(2 * HASH_LENGTH + padded, 0);
    out
}

/// Big-endian 32-byte word holding `n`.
pub fn abi_word(n: u64) -> [u8; HASH_LENGTH] {
    let mut word = [0u8; HASH_LENGTH];
    word[HASH_LENGTH - 8..].copy_from_slice(&n.to_be_bytes());
    word
}

static RAW: RawKeccak = RawKeccak;
static STANDARD: StandardEncoding = StandardEncoding;

/// Selectable leaf encoding, as named in configuration files and CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingKind {
    #[default]
    Raw,
    Standard,
}

impl EncodingKind {
    pub fn encoder(&self) -> &'static dyn LeafEncoding {
        match self {
            EncodingKind::Raw => &RAW,
            EncodingKind::Standard => &STANDARD,
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoder().name())
    }
}

impl FromStr for EncodingKind {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "keccak" => Ok(EncodingKind::Raw),
            "standard" | "abi" => Ok(EncodingKind::Standard),
            other => Err(MerkleError::InvalidInput(format!(
                "Unknown leaf encoding: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abi_encode_short_string() {
        let encoded = abi_encode_dynamic(b"a");
        assert_eq!(encoded.len(), 96);
        assert_eq!(encoded[31], 0x20);
        assert_eq!(encoded[63], 0x01);
        assert_eq!(encoded[64], b'a');
        assert!(encoded[65..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_abi_encode_word_aligned_and_empty() {
        assert_eq!(abi_encode_dynamic(&[7u8; 32]).len(), 96);
        assert_eq!(abi_encode_dynamic(&[7u8; 33]).len(), 128);

        let empty = abi_encode_dynamic(b"");
        assert_eq!(empty.len(), 64);
        assert_eq!(&empty[32..], &[0u8; 32]);
    }

    #[test]
    fn test_standard_leaf_vectors() {
        // Leaf hashes of single-character `string` values under the
        // OpenZeppelin StandardMerkleTree encoding.
        let cases = [
            ("a", "0x9c15a6a0eaeed500fd9eed4cbeab71f797cefcc67bfd46683e4d2e6ff7f06d1c"),
            ("A", "0x6efbf77e320741a027b50f02224545461f97cd83762d5fbfeb894b9eb3287c16"),
            ("B", "0x7051e21dd45e25ed8c605a53da6f77de151dcbf47b0e3ced3c5d8b61f4a13dbc"),
        ];
        for (value, expected) in cases {
            assert_eq!(StandardEncoding.leaf_hash(value.as_bytes()).to_hex(), expected);
        }
    }

    #[test]
    fn test_raw_leaf_is_plain_keccak() {
        assert_eq!(RawKeccak.leaf_hash(b"a"), keccak256(b"a"));
        assert_ne!(RawKeccak.leaf_hash(b"a"), StandardEncoding.leaf_hash(b"a"));
    }

    #[test]
    fn test_encoding_kind_parse() {
        assert_eq!("raw".parse::<EncodingKind>().unwrap(), EncodingKind::Raw);
        assert_eq!("Standard".parse::<EncodingKind>().unwrap(), EncodingKind::Standard);
        assert!("sha256".parse::<EncodingKind>().is_err());
        assert_eq!(EncodingKind::Standard.to_string(), "standard");
    }
}
