//! Tally and turnout derived from committed chain contents.

use std::collections::BTreeMap;

use crate::chain::Chain;

/// Derives per-candidate counts from the ledger.
///
/// Only committed transactions count; the pending pool is invisible here.
/// Every configured candidate appears in the tally, at zero if necessary,
/// so pollers always see the full field.
pub struct ResultsAggregator {
    candidates: Vec<String>,
}

impl ResultsAggregator {
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    /// Per-candidate vote counts over all committed transactions.
    pub fn tally(&self, chain: &Chain) -> BTreeMap<String, u64> {
        let mut counts: BTreeMap<String, u64> = self
            .candidates
            .iter()
            .map(|c| (c.clone(), 0))
            .collect();

        for block in chain.blocks() {
            for tx in &block.transactions {
                *counts.entry(tx.candidate.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Votes cast as a percentage of voters eligible to cast them.
    ///
    /// Zero when there are no active voters — never a division by zero.
    pub fn turnout(&self, chain: &Chain, active_voters: usize) -> f64 {
        if active_voters == 0 {
            return 0.0;
        }
        let total: u64 = chain
            .blocks()
            .iter()
            .map(|b| b.transactions.len() as u64)
            .sum();
        (total as f64 / active_voters as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votechain_types::{Timestamp, VoteTransaction, VoterHash};
    use votechain_work::Miner;

    const DIFFICULTY: u8 = 4;

    fn aggregator() -> ResultsAggregator {
        ResultsAggregator::new(vec!["Candidate A".into(), "Candidate B".into()])
    }

    fn chain_with_votes(votes: &[(u8, &str)]) -> Chain {
        let mut chain = Chain::new(DIFFICULTY);
        let miner = Miner::new(DIFFICULTY);
        for &(seed, candidate) in votes {
            let tx = VoteTransaction::new(
                VoterHash::new([seed; 32]),
                candidate,
                Timestamp::new(seed as u64),
            );
            let block = miner
                .mine(vec![tx], chain.tip(), Timestamp::new(5000), || false)
                .unwrap();
            chain.append(block).unwrap();
        }
        chain
    }

    #[test]
    fn empty_chain_tallies_all_zeroes() {
        let tally = aggregator().tally(&Chain::new(DIFFICULTY));
        assert_eq!(tally.get("Candidate A"), Some(&0));
        assert_eq!(tally.get("Candidate B"), Some(&0));
    }

    #[test]
    fn tally_counts_committed_votes() {
        let chain = chain_with_votes(&[(1, "Candidate A"), (2, "Candidate A"), (3, "Candidate B")]);
        let tally = aggregator().tally(&chain);
        assert_eq!(tally.get("Candidate A"), Some(&2));
        assert_eq!(tally.get("Candidate B"), Some(&1));
    }

    #[test]
    fn tally_sums_to_committed_transaction_count() {
        let chain = chain_with_votes(&[(1, "Candidate A"), (2, "Candidate B")]);
        let total: u64 = aggregator().tally(&chain).values().sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn turnout_is_zero_without_active_voters() {
        let chain = chain_with_votes(&[(1, "Candidate A")]);
        assert_eq!(aggregator().turnout(&chain, 0), 0.0);
    }

    #[test]
    fn turnout_is_a_percentage() {
        let chain = chain_with_votes(&[(1, "Candidate A")]);
        assert_eq!(aggregator().turnout(&chain, 4), 25.0);
    }
}
