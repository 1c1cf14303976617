//! Hash utilities and types for merkle trees.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;

use crate::{MerkleError, MerkleResult, HASH_LENGTH};

/// A 256-bit hash value used for leaves and internal nodes.
///
/// Ordering is byte-wise ascending, which is the order `hash_pair` sorts by.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HashValue([u8; HASH_LENGTH]);

impl HashValue {
    /// The zero hash (all zeros)
    pub const ZERO: HashValue = HashValue([0u8; HASH_LENGTH]);

    /// Create a new HashValue from a fixed-size array
    pub fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create a HashValue from a slice
    pub fn from_slice(bytes: &[u8]) -> MerkleResult<Self> {
        if bytes.len() != HASH_LENGTH {
            return Err(MerkleError::InvalidHashLength {
                expected: HASH_LENGTH,
                got: bytes.len(),
            });
        }
        let mut arr = [0u8; HASH_LENGTH];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Create a HashValue from hex string, with or without the `0x` prefix
    pub fn from_hex(hex_str: &str) -> MerkleResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str)
            .map_err(|e| MerkleError::InvalidInput(format!("Invalid hex: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Lowercase hex with the `0x` prefix, as the fixture scripts print it
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue({})", self)
    }
}

impl AsRef<[u8]> for HashValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH_LENGTH]> for HashValue {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

// Hex strings for human-readable formats (JSON fixtures), raw bytes otherwise.
impl Serialize for HashValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for HashValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            HashValue::from_hex(&s).map_err(de::Error::custom)
        } else {
            <[u8; HASH_LENGTH]>::deserialize(deserializer).map(HashValue)
        }
    }
}

impl std::str::FromStr for HashValue {
    type Err = MerkleError;

    fn from_str(s: &str) -> MerkleResult<Self> {
        Self::from_hex(s)
    }
}

/// Hash data using Keccak-256
pub fn keccak256(data: &[u8]) -> HashValue {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    HashValue(hasher.finalize().into())
}

/// Hash two sibling nodes into their parent.
///
/// The pair is sorted before hashing, so `hash_pair(a, b) == hash_pair(b, a)`
/// and a node's identity depends only on the set of its children.
pub fn hash_pair(a: &HashValue, b: &HashValue) -> HashValue {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(lo.as_bytes());
    hasher.update(hi.as_bytes());
    HashValue(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_vectors() {
        assert_eq!(
            keccak256(b"").to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            keccak256(b"a").to_hex(),
            "0x3ac225168df54212a25c1c01fd35bebfea408fdac2e31ddd6f80a4bbf9a5f1cb"
        );
    }

    #[test]
    fn test_hash_pair_is_commutative() {
        let a = keccak256(b"left");
        let b = keccak256(b"right");
        assert_ne!(a, b);
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn test_hash_pair_hashes_sorted_concatenation() {
        let a = HashValue::new([0x11; 32]);
        let b = HashValue::new([0x22; 32]);

        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(a.as_bytes());
        concat.extend_from_slice(b.as_bytes());

        assert_eq!(hash_pair(&b, &a), keccak256(&concat));
    }

    #[test]
    fn test_hex_roundtrip() {
        let hash = keccak256(b"roundtrip");
        let parsed = HashValue::from_hex(&hash.to_string()).unwrap();
        assert_eq!(parsed, hash);

        let unprefixed: HashValue = hex::encode(hash.as_bytes()).parse().unwrap();
        assert_eq!(unprefixed, hash);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        let err = HashValue::from_slice(&[0u8; 31]).unwrap_err();
        assert_eq!(
            err,
            MerkleError::InvalidHashLength {
                expected: HASH_LENGTH,
                got: 31
            }
        );
        assert!(HashValue::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_json_uses_prefixed_hex() {
        let hash = keccak256(b"json");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash));
        assert_eq!(serde_json::from_str::<HashValue>(&json).unwrap(), hash);
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let mut low = [0xFF; 32];
        low[0] = 0x00;
        let high = HashValue::new([0x01; 32]);
        assert!(HashValue::new(low) < high);
        assert!(HashValue::ZERO < HashValue::new(low));
    }
}
