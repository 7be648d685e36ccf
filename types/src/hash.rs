//! Cryptographic hash types for blocks, transactions and voter identifiers.
//!
//! All three are 32-byte Blake2b-256 digests. On the wire they are lowercase
//! hex strings, except that the all-zero `BlockHash` — the genesis
//! predecessor sentinel — serializes as `"0"`.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// Wire form of the genesis predecessor.
const GENESIS_SENTINEL: &str = "0";

type Blake2b256 = Blake2b<U32>;

/// Compute a Blake2b-256 digest over a sequence of byte slices, without
/// concatenating them first.
///
/// The one digest primitive in the workspace: block and transaction
/// preimages here, voter-identifier derivation in the crypto crate.
pub fn digest_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

fn decode_hex32<E: DeError>(s: &str) -> Result<[u8; 32], E> {
    let bytes = hex::decode(s).map_err(E::custom)?;
    bytes
        .try_into()
        .map_err(|_| E::custom("expected a 32-byte hex digest"))
}

/// A 32-byte block hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl Default for BlockHash {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({}…)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            f.write_str(GENESIS_SENTINEL)
        } else {
            f.write_str(&hex::encode(self.0))
        }
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == GENESIS_SENTINEL {
            return Ok(Self::ZERO);
        }
        decode_hex32(&s).map(Self)
    }
}

/// A 32-byte vote-transaction hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({}…)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_hex32(&s).map(Self)
    }
}

/// A 32-byte one-way voter identifier, derived from the raw ID supplied at
/// registration. Ledger consumers only ever see this form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoterHash([u8; 32]);

impl VoterHash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for VoterHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoterHash({}…)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for VoterHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for VoterHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for VoterHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_hex32(&s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_block_hash_serializes_as_sentinel() {
        let json = serde_json::to_string(&BlockHash::ZERO).unwrap();
        assert_eq!(json, "\"0\"");
    }

    #[test]
    fn sentinel_parses_back_to_zero() {
        let hash: BlockHash = serde_json::from_str("\"0\"").unwrap();
        assert!(hash.is_zero());
    }

    #[test]
    fn nonzero_block_hash_round_trips_as_hex() {
        let hash = BlockHash::new([0xAB; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json.len(), 66); // 64 hex chars + quotes
        let back: BlockHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn short_hex_is_rejected() {
        let result: Result<BlockHash, _> = serde_json::from_str("\"abcd\"");
        assert!(result.is_err());
    }

    #[test]
    fn voter_hash_round_trips() {
        let hash = VoterHash::new([7; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        let back: VoterHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn digest_parts_matches_concatenation() {
        let split = digest_parts(&[b"hello", b"world"]);
        let joined = digest_parts(&[b"helloworld"]);
        assert_eq!(split, joined);
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(digest_parts(&[b"hello"]), digest_parts(&[b"hello"]));
    }

    #[test]
    fn digest_differs_across_inputs() {
        assert_ne!(digest_parts(&[b"hello"]), digest_parts(&[b"world"]));
    }

    #[test]
    fn empty_input_digest_is_not_zero() {
        assert_ne!(digest_parts(&[]), [0u8; 32]);
    }
}
