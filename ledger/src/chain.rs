//! The chain itself: append validation and tip management.

use std::collections::HashSet;

use votechain_types::{Block, VoterHash};
use votechain_work::meets_difficulty;

use crate::audit::{audit_blocks, Violation};
use crate::error::LedgerError;
use crate::genesis::genesis_block;

/// The append-only block sequence.
///
/// The chain exclusively owns its blocks; acceptance happens in `append`
/// and nothing mutates a block afterwards. `previous_hash` is a value copy
/// of the predecessor's digest, so the structure is a plain vector with no
/// back-pointers.
pub struct Chain {
    blocks: Vec<Block>,
    difficulty_bits: u8,
    halted: bool,
}

impl Chain {
    /// Create a chain holding only the genesis block.
    pub fn new(difficulty_bits: u8) -> Self {
        Self {
            blocks: vec![genesis_block()],
            difficulty_bits,
            halted: false,
        }
    }

    /// Rebuild a chain from an existing block sequence.
    ///
    /// Does not validate; callers run [`Chain::audit`] separately. An empty
    /// sequence falls back to a fresh genesis.
    pub fn from_blocks(blocks: Vec<Block>, difficulty_bits: u8) -> Self {
        let blocks = if blocks.is_empty() {
            vec![genesis_block()]
        } else {
            blocks
        };
        Self {
            blocks,
            difficulty_bits,
            halted: false,
        }
    }

    /// The current chain head. The chain always holds at least genesis.
    pub fn tip(&self) -> &Block {
        self.blocks.last().expect("chain always holds genesis")
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn difficulty_bits(&self) -> u8 {
        self.difficulty_bits
    }

    /// Whether a committed transaction already exists for this voter.
    pub fn has_voted(&self, voter: &VoterHash) -> bool {
        self.blocks
            .iter()
            .flat_map(|b| &b.transactions)
            .any(|tx| tx.voter == *voter)
    }

    /// Whether the chain refuses appends after a detected violation.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Stop accepting blocks. Set when an audit finds violations; cleared
    /// only by operator intervention (restart with a clean chain).
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Validate and append a block as the new tip.
    ///
    /// On success the chain is extended atomically from the caller's point
    /// of view — the block is either fully accepted or the chain is
    /// untouched.
    pub fn append(&mut self, block: Block) -> Result<(), LedgerError> {
        if self.halted {
            return Err(LedgerError::Halted);
        }

        let tip = self.tip();
        if block.index != tip.index + 1 {
            return Err(LedgerError::InvalidLinkage {
                reason: format!(
                    "block index {} does not follow tip index {}",
                    block.index, tip.index
                ),
            });
        }
        if block.previous_hash != tip.hash {
            return Err(LedgerError::InvalidLinkage {
                reason: format!(
                    "previous_hash {} does not match tip hash {}",
                    block.previous_hash, tip.hash
                ),
            });
        }

        let recomputed = block.compute_hash();
        if block.hash != recomputed {
            return Err(LedgerError::InvalidProof {
                reason: "stored hash does not match block contents".into(),
            });
        }
        if !meets_difficulty(&block.hash, self.difficulty_bits) {
            return Err(LedgerError::InvalidProof {
                reason: format!(
                    "hash does not carry {} leading zero bits",
                    self.difficulty_bits
                ),
            });
        }
        for tx in &block.transactions {
            if tx.hash != tx.compute_hash() {
                return Err(LedgerError::InvalidProof {
                    reason: format!("transaction {} does not match its contents", tx.hash),
                });
            }
        }

        // Global vote uniqueness: against the chain and within the block.
        let mut seen = HashSet::new();
        for tx in &block.transactions {
            if self.has_voted(&tx.voter) || !seen.insert(tx.voter) {
                return Err(LedgerError::DuplicateVoteInChain { voter: tx.voter });
            }
        }

        self.blocks.push(block);
        Ok(())
    }

    /// Walk the full chain from genesis, verifying linkage, hash
    /// correctness, proof-of-work and global vote uniqueness.
    pub fn audit(&self) -> Result<(), Vec<Violation>> {
        let violations = audit_blocks(&self.blocks, self.difficulty_bits);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votechain_types::{Timestamp, VoteTransaction};
    use votechain_work::Miner;

    const DIFFICULTY: u8 = 4;

    fn tx(seed: u8) -> VoteTransaction {
        VoteTransaction::new(
            VoterHash::new([seed; 32]),
            "Candidate A",
            Timestamp::new(1000 + seed as u64),
        )
    }

    fn mined(chain: &Chain, transactions: Vec<VoteTransaction>) -> Block {
        Miner::new(DIFFICULTY)
            .mine(transactions, chain.tip(), Timestamp::new(2000), || false)
            .unwrap()
    }

    #[test]
    fn new_chain_holds_genesis() {
        let chain = Chain::new(DIFFICULTY);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.tip().index, 0);
    }

    #[test]
    fn append_extends_the_tip() {
        let mut chain = Chain::new(DIFFICULTY);
        let block = mined(&chain, vec![tx(1)]);
        let hash = block.hash;
        chain.append(block).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.tip().hash, hash);
        assert!(chain.has_voted(&VoterHash::new([1; 32])));
    }

    #[test]
    fn append_rejects_wrong_previous_hash() {
        let mut chain = Chain::new(DIFFICULTY);
        let mut block = mined(&chain, vec![tx(1)]);
        block.previous_hash = votechain_types::BlockHash::new([0xEE; 32]);
        block.seal();
        let err = chain.append(block).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidLinkage { .. }));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn append_rejects_wrong_index() {
        let mut chain = Chain::new(DIFFICULTY);
        let mut block = mined(&chain, vec![tx(1)]);
        block.index = 5;
        block.seal();
        let err = chain.append(block).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidLinkage { .. }));
    }

    #[test]
    fn append_rejects_tampered_hash() {
        let mut chain = Chain::new(DIFFICULTY);
        let mut block = mined(&chain, vec![tx(1)]);
        block.nonce += 1; // hash no longer matches contents
        let err = chain.append(block).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidProof { .. }));
    }

    #[test]
    fn append_rejects_insufficient_work() {
        // Mine at zero difficulty, append to a chain demanding more.
        let mut chain = Chain::new(16);
        let mut candidate = None;
        // Find a sealed block that genuinely fails 16 bits.
        for ts in 0u64..64 {
            let block = Miner::new(0)
                .mine(vec![tx(1)], chain.tip(), Timestamp::new(ts), || false)
                .unwrap();
            if !meets_difficulty(&block.hash, 16) {
                candidate = Some(block);
                break;
            }
        }
        let err = chain.append(candidate.expect("low-work block")).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidProof { .. }));
    }

    #[test]
    fn append_rejects_duplicate_voter_across_blocks() {
        let mut chain = Chain::new(DIFFICULTY);
        chain.append(mined(&chain, vec![tx(1)])).unwrap();
        let err = chain.append(mined(&chain, vec![tx(1)])).unwrap_err();
        assert_eq!(
            err,
            LedgerError::DuplicateVoteInChain {
                voter: VoterHash::new([1; 32])
            }
        );
    }

    #[test]
    fn append_rejects_duplicate_voter_within_block() {
        let mut chain = Chain::new(DIFFICULTY);
        let err = chain
            .append(mined(&chain, vec![tx(1), tx(1)]))
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateVoteInChain { .. }));
    }

    #[test]
    fn halted_chain_refuses_appends() {
        let mut chain = Chain::new(DIFFICULTY);
        chain.halt();
        let block = mined(&chain, vec![tx(1)]);
        assert_eq!(chain.append(block).unwrap_err(), LedgerError::Halted);
    }

    #[test]
    fn valid_chain_audits_clean() {
        let mut chain = Chain::new(DIFFICULTY);
        chain.append(mined(&chain, vec![tx(1)])).unwrap();
        chain.append(mined(&chain, vec![tx(2), tx(3)])).unwrap();
        assert!(chain.audit().is_ok());
    }
}
