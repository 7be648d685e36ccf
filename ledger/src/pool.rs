//! The pending-transaction pool.
//!
//! Votes wait here between intake and mining. The pool preserves submission
//! order; the service layer serializes all access, so the pool itself is a
//! plain container.

use votechain_types::{VoteTransaction, VoterHash};

pub struct PendingPool {
    transactions: Vec<VoteTransaction>,
}

impl PendingPool {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Whether this voter already has a queued transaction.
    pub fn contains(&self, voter: &VoterHash) -> bool {
        self.transactions.iter().any(|tx| tx.voter == *voter)
    }

    /// Enqueue a transaction. The caller holds the writer lock and has
    /// already run the duplicate check.
    pub fn push(&mut self, tx: VoteTransaction) {
        self.transactions.push(tx);
    }

    /// The next batch to mine, oldest first, capped at `max`.
    pub fn next_batch(&self, max: usize) -> Vec<VoteTransaction> {
        self.transactions.iter().take(max).cloned().collect()
    }

    /// Drop entries that were just committed. Returns how many were removed.
    pub fn remove_committed(&mut self, committed: &[VoteTransaction]) -> usize {
        let before = self.transactions.len();
        self.transactions
            .retain(|tx| !committed.iter().any(|c| c.hash == tx.hash));
        before - self.transactions.len()
    }

    pub fn transactions(&self) -> &[VoteTransaction] {
        &self.transactions
    }
}

impl Default for PendingPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votechain_types::Timestamp;

    fn tx(seed: u8) -> VoteTransaction {
        VoteTransaction::new(
            VoterHash::new([seed; 32]),
            "Candidate A",
            Timestamp::new(seed as u64),
        )
    }

    #[test]
    fn contains_tracks_queued_voters() {
        let mut pool = PendingPool::new();
        pool.push(tx(1));
        assert!(pool.contains(&VoterHash::new([1; 32])));
        assert!(!pool.contains(&VoterHash::new([2; 32])));
    }

    #[test]
    fn next_batch_is_capped_and_ordered() {
        let mut pool = PendingPool::new();
        for seed in 1..=5 {
            pool.push(tx(seed));
        }
        let batch = pool.next_batch(3);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].voter, VoterHash::new([1; 32]));
        assert_eq!(batch[2].voter, VoterHash::new([3; 32]));
        // Snapshot only; the pool still holds everything.
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn remove_committed_drops_only_mined_entries() {
        let mut pool = PendingPool::new();
        for seed in 1..=4 {
            pool.push(tx(seed));
        }
        let batch = pool.next_batch(2);
        let removed = pool.remove_committed(&batch);
        assert_eq!(removed, 2);
        assert_eq!(pool.len(), 2);
        assert!(pool.contains(&VoterHash::new([3; 32])));
        assert!(!pool.contains(&VoterHash::new([1; 32])));
    }
}
