use proptest::prelude::*;

use votechain_types::{Block, BlockHash, Timestamp, VoteTransaction, VoterHash};

proptest! {
    /// BlockHash roundtrip: new -> as_bytes -> new produces identical hash.
    #[test]
    fn block_hash_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = BlockHash::new(bytes);
        prop_assert_eq!(hash.as_bytes(), &bytes);
    }

    /// BlockHash::is_zero is true only for all-zero bytes.
    #[test]
    fn block_hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let hash = BlockHash::new(bytes);
        prop_assert_eq!(hash.is_zero(), bytes == [0u8; 32]);
    }

    /// JSON roundtrip preserves every hash, including the zero sentinel.
    #[test]
    fn block_hash_json_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = BlockHash::new(bytes);
        let encoded = serde_json::to_string(&hash).unwrap();
        let decoded: BlockHash = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, hash);
    }

    /// Transaction hashing is deterministic and injective over the voter.
    #[test]
    fn tx_hash_tracks_voter(
        a in prop::array::uniform32(0u8..),
        b in prop::array::uniform32(0u8..),
        ts in 0u64..u64::MAX / 2,
    ) {
        let tx_a = VoteTransaction::new(VoterHash::new(a), "Candidate A", Timestamp::new(ts));
        let tx_b = VoteTransaction::new(VoterHash::new(b), "Candidate A", Timestamp::new(ts));
        prop_assert_eq!(a == b, tx_a.hash == tx_b.hash);
    }

    /// Any nonce change produces a different block hash.
    #[test]
    fn block_hash_tracks_nonce(n1 in any::<u64>(), n2 in any::<u64>()) {
        let mut block = Block::candidate(
            1,
            Timestamp::new(1000),
            Vec::new(),
            BlockHash::new([0x42; 32]),
        );
        block.nonce = n1;
        let h1 = block.compute_hash();
        block.nonce = n2;
        let h2 = block.compute_hash();
        prop_assert_eq!(n1 == n2, h1 == h2);
    }

    /// Sealed blocks always verify against recomputation.
    #[test]
    fn sealed_block_verifies(
        index in 0u64..1_000_000,
        ts in 0u64..u64::MAX / 2,
        nonce in any::<u64>(),
        prev in prop::array::uniform32(0u8..),
    ) {
        let mut block = Block::candidate(
            index,
            Timestamp::new(ts),
            Vec::new(),
            BlockHash::new(prev),
        );
        block.nonce = nonce;
        block.seal();
        prop_assert_eq!(block.hash, block.compute_hash());
    }
}
