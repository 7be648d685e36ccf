//! The bridge between the HTTP surface and the node.
//!
//! The node implements this trait on its election service; handlers only
//! ever see the trait object. Admin authentication happens in the HTTP
//! layer — by the time a backend method runs, the call is authorized.

use std::collections::BTreeMap;

use votechain_ledger::Violation;
use votechain_types::{Block, Timestamp, TxHash, Voter, VoterHash, VoterMetadata};

use crate::error::ApiError;

pub trait ElectionBackend: Send + Sync {
    /// Register a voter; returns the derived one-way identifier.
    fn register_voter(
        &self,
        original_id: &str,
        metadata: VoterMetadata,
    ) -> Result<VoterHash, ApiError>;

    /// Approve a pending voter.
    fn approve_voter(&self, voter_hash: &VoterHash) -> Result<(), ApiError>;

    /// Suspend a voter.
    fn suspend_voter(&self, voter_hash: &VoterHash) -> Result<(), ApiError>;

    /// Validate and enqueue a vote; returns the transaction hash.
    fn submit_vote(
        &self,
        voter_id: &str,
        candidate: &str,
        timestamp: Option<Timestamp>,
    ) -> Result<TxHash, ApiError>;

    /// Snapshot of the committed chain.
    fn chain(&self) -> Vec<Block>;

    /// Per-candidate tally over committed transactions.
    fn results(&self) -> BTreeMap<String, u64>;

    /// Votes cast as a percentage of active voters.
    fn turnout(&self) -> f64;

    /// Snapshot of all voters in registration order.
    fn voters(&self) -> Vec<Voter>;

    /// Full-chain integrity audit.
    fn audit(&self) -> Result<(), Vec<Violation>>;
}
