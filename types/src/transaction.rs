//! Vote transactions — a single cast vote, immutable once created.

use serde::{Deserialize, Serialize};

use crate::hash::{digest_parts, TxHash, VoterHash};
use crate::time::Timestamp;

/// A single vote record.
///
/// The `hash` commits to every other field; it is computed at construction
/// and re-derivable at any time, so tampering with a stored transaction is
/// detectable by recomputation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoteTransaction {
    /// One-way voter identifier — never the raw registration ID.
    #[serde(rename = "voter_id")]
    pub voter: VoterHash,
    pub candidate: String,
    pub timestamp: Timestamp,
    pub hash: TxHash,
}

impl VoteTransaction {
    pub fn new(voter: VoterHash, candidate: impl Into<String>, timestamp: Timestamp) -> Self {
        let mut tx = Self {
            voter,
            candidate: candidate.into(),
            timestamp,
            hash: TxHash::ZERO,
        };
        tx.hash = tx.compute_hash();
        tx
    }

    /// Recompute the digest over `(voter, candidate, timestamp)`.
    ///
    /// The candidate label is length-prefixed so distinct field splits can
    /// never produce the same preimage.
    pub fn compute_hash(&self) -> TxHash {
        let candidate_len = (self.candidate.len() as u32).to_be_bytes();
        TxHash::new(digest_parts(&[
            self.voter.as_bytes(),
            &candidate_len,
            self.candidate.as_bytes(),
            &self.timestamp.as_secs().to_be_bytes(),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> VoteTransaction {
        VoteTransaction::new(
            VoterHash::new([3; 32]),
            "Candidate A",
            Timestamp::new(1700000000),
        )
    }

    #[test]
    fn hash_is_computed_at_construction() {
        let tx = sample_tx();
        assert!(!tx.hash.is_zero());
        assert_eq!(tx.hash, tx.compute_hash());
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(sample_tx().hash, sample_tx().hash);
    }

    #[test]
    fn hash_depends_on_every_field() {
        let base = sample_tx();

        let other_voter =
            VoteTransaction::new(VoterHash::new([4; 32]), "Candidate A", base.timestamp);
        assert_ne!(base.hash, other_voter.hash);

        let other_candidate = VoteTransaction::new(base.voter, "Candidate B", base.timestamp);
        assert_ne!(base.hash, other_candidate.hash);

        let other_time =
            VoteTransaction::new(base.voter, "Candidate A", Timestamp::new(1700000001));
        assert_ne!(base.hash, other_time.hash);
    }

    #[test]
    fn wire_form_uses_voter_id_key() {
        let json = serde_json::to_value(sample_tx()).unwrap();
        assert!(json.get("voter_id").is_some());
        assert!(json.get("voter").is_none());
    }
}
