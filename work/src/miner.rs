//! The nonce search.

use votechain_types::{Block, Timestamp, VoteTransaction};

use crate::difficulty::meets_difficulty;
use crate::error::WorkError;

/// Nonces tried between cancellation checks.
const BATCH_SIZE: u64 = 4096;

/// Produces valid blocks from pending transactions.
///
/// The search starts at nonce 0 and increments by 1, so identical inputs
/// always reach the identical nonce and hash. Termination for practical
/// difficulty levels is probabilistic, not absolute; the `cancel` hook is
/// the cooperative preemption point for stale-work abort and shutdown.
#[derive(Clone, Copy, Debug)]
pub struct Miner {
    difficulty_bits: u8,
}

impl Miner {
    pub fn new(difficulty_bits: u8) -> Self {
        Self { difficulty_bits }
    }

    pub fn difficulty_bits(&self) -> u8 {
        self.difficulty_bits
    }

    /// Mine a block extending `previous` with the given batch.
    ///
    /// Returns `WorkError::InvalidPrevious` when the previous block was
    /// never sealed, and `WorkError::Cancelled` when `cancel` reports true
    /// at a batch boundary.
    pub fn mine(
        &self,
        transactions: Vec<VoteTransaction>,
        previous: &Block,
        timestamp: Timestamp,
        cancel: impl Fn() -> bool,
    ) -> Result<Block, WorkError> {
        if previous.hash.is_zero() {
            return Err(WorkError::InvalidPrevious);
        }

        let mut block = Block::candidate(
            previous.index + 1,
            timestamp,
            transactions,
            previous.hash,
        );

        let mut nonce: u64 = 0;
        loop {
            for _ in 0..BATCH_SIZE {
                block.nonce = nonce;
                let hash = block.compute_hash();
                if meets_difficulty(&hash, self.difficulty_bits) {
                    block.hash = hash;
                    return Ok(block);
                }
                nonce = nonce.wrapping_add(1);
            }
            if cancel() {
                return Err(WorkError::Cancelled);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votechain_types::{BlockHash, VoterHash};

    fn previous_block() -> Block {
        let mut block = Block::candidate(0, Timestamp::EPOCH, Vec::new(), BlockHash::ZERO);
        block.seal();
        block
    }

    fn sample_batch() -> Vec<VoteTransaction> {
        vec![VoteTransaction::new(
            VoterHash::new([5; 32]),
            "Candidate A",
            Timestamp::new(1700000000),
        )]
    }

    #[test]
    fn mined_block_satisfies_difficulty() {
        let miner = Miner::new(8);
        let previous = previous_block();
        let block = miner
            .mine(sample_batch(), &previous, Timestamp::new(1), || false)
            .unwrap();
        assert!(meets_difficulty(&block.hash, 8));
        assert_eq!(block.hash, block.compute_hash());
    }

    #[test]
    fn mined_block_links_to_previous() {
        let miner = Miner::new(4);
        let previous = previous_block();
        let block = miner
            .mine(sample_batch(), &previous, Timestamp::new(1), || false)
            .unwrap();
        assert_eq!(block.index, previous.index + 1);
        assert_eq!(block.previous_hash, previous.hash);
        assert_eq!(block.transactions.len(), 1);
    }

    #[test]
    fn mining_is_deterministic() {
        let miner = Miner::new(8);
        let previous = previous_block();
        let a = miner
            .mine(sample_batch(), &previous, Timestamp::new(1), || false)
            .unwrap();
        let b = miner
            .mine(sample_batch(), &previous, Timestamp::new(1), || false)
            .unwrap();
        assert_eq!(a.nonce, b.nonce);
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn zero_difficulty_accepts_nonce_zero() {
        let miner = Miner::new(0);
        let previous = previous_block();
        let block = miner
            .mine(Vec::new(), &previous, Timestamp::new(1), || false)
            .unwrap();
        assert_eq!(block.nonce, 0);
    }

    #[test]
    fn unsealed_previous_is_rejected() {
        let miner = Miner::new(4);
        let unsealed = Block::candidate(0, Timestamp::EPOCH, Vec::new(), BlockHash::ZERO);
        let err = miner
            .mine(Vec::new(), &unsealed, Timestamp::new(1), || false)
            .unwrap_err();
        assert_eq!(err, WorkError::InvalidPrevious);
    }

    #[test]
    fn cancellation_aborts_the_search() {
        // 255 leading zero bits will not be found in one batch.
        let miner = Miner::new(255);
        let previous = previous_block();
        let err = miner
            .mine(Vec::new(), &previous, Timestamp::new(1), || true)
            .unwrap_err();
        assert_eq!(err, WorkError::Cancelled);
    }
}
