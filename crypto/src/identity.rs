//! One-way voter identifier derivation.
//!
//! The raw registration ID never leaves the registry; every transaction and
//! every wire surface carries only the derived hash. The derivation is
//! domain-separated so a voter hash can never collide with a block or
//! transaction digest over the same bytes.

use votechain_types::hash::digest_parts;
use votechain_types::VoterHash;

/// Domain separator for voter identifiers.
const VOTER_ID_DOMAIN: &[u8] = b"votechain.voter.v1";

/// Derive the stable one-way identifier for a raw voter ID.
///
/// Deterministic: the same input always derives the same hash, which is what
/// lets registration, intake and duplicate detection agree on identity
/// without ever storing the raw ID in the ledger.
pub fn derive_voter_hash(original_id: &str) -> VoterHash {
    VoterHash::new(digest_parts(&[VOTER_ID_DOMAIN, original_id.as_bytes()]))
}
