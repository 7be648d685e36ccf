//! Blocks — ordered, hash-linked batches of vote transactions.

use serde::{Deserialize, Serialize};

use crate::hash::{digest_parts, BlockHash};
use crate::time::Timestamp;
use crate::transaction::VoteTransaction;

/// One block in the chain.
///
/// `hash` is the Blake2b-256 digest of the canonical encoding of
/// `(index, timestamp, transactions, previous_hash, nonce)` and is never
/// trusted as stored — validation always recomputes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: Timestamp,
    pub transactions: Vec<VoteTransaction>,
    /// Hash of the predecessor; the genesis block carries the zero sentinel.
    pub previous_hash: BlockHash,
    pub nonce: u64,
    pub hash: BlockHash,
}

impl Block {
    /// Build an unsealed candidate block (nonce 0, hash unset) for mining.
    pub fn candidate(
        index: u64,
        timestamp: Timestamp,
        transactions: Vec<VoteTransaction>,
        previous_hash: BlockHash,
    ) -> Self {
        Self {
            index,
            timestamp,
            transactions,
            previous_hash,
            nonce: 0,
            hash: BlockHash::ZERO,
        }
    }

    /// Recompute this block's digest from its contents.
    ///
    /// Transactions enter the preimage by their own hashes; each of those in
    /// turn commits to the transaction's fields, so any mutation anywhere in
    /// the block is visible here or in the per-transaction recomputation.
    pub fn compute_hash(&self) -> BlockHash {
        let index = self.index.to_be_bytes();
        let timestamp = self.timestamp.as_secs().to_be_bytes();
        let tx_count = (self.transactions.len() as u32).to_be_bytes();
        let nonce = self.nonce.to_be_bytes();

        let mut parts: Vec<&[u8]> = Vec::with_capacity(5 + self.transactions.len());
        parts.push(&index);
        parts.push(&timestamp);
        parts.push(&tx_count);
        for tx in &self.transactions {
            parts.push(tx.hash.as_bytes());
        }
        parts.push(self.previous_hash.as_bytes());
        parts.push(&nonce);

        BlockHash::new(digest_parts(&parts))
    }

    /// Store the freshly computed hash on the block.
    pub fn seal(&mut self) {
        self.hash = self.compute_hash();
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}
