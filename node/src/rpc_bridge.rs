//! Bridges the election service into the RPC layer's backend trait.

use std::collections::BTreeMap;

use votechain_ledger::{LedgerError, Violation};
use votechain_registry::RegistryError;
use votechain_rpc::{ApiError, ElectionBackend};
use votechain_types::{Block, Timestamp, TxHash, Voter, VoterHash, VoterMetadata};

use crate::error::NodeError;
use crate::service::ElectionService;

impl From<NodeError> for ApiError {
    fn from(err: NodeError) -> Self {
        match err {
            NodeError::VoterNotFound => ApiError::BadRequest("Voter not registered".into()),
            NodeError::VoterNotEligible { .. } => {
                ApiError::BadRequest("Voter is not approved to vote".into())
            }
            NodeError::InvalidCandidate(candidate) => {
                ApiError::BadRequest(format!("Invalid candidate: {candidate}"))
            }
            NodeError::DuplicateVote => ApiError::BadRequest("Already voted".into()),
            NodeError::Registry(RegistryError::DuplicateVoter) => {
                ApiError::BadRequest("Voter already registered".into())
            }
            NodeError::Registry(RegistryError::NotFound) => {
                ApiError::NotFound("Voter not found".into())
            }
            NodeError::Registry(e @ RegistryError::InvalidState { .. }) => {
                ApiError::BadRequest(e.to_string())
            }
            NodeError::Ledger(LedgerError::Halted) => ApiError::Halted,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ElectionBackend for ElectionService {
    fn register_voter(
        &self,
        original_id: &str,
        metadata: VoterMetadata,
    ) -> Result<VoterHash, ApiError> {
        Ok(ElectionService::register_voter(self, original_id, metadata)?)
    }

    fn approve_voter(&self, voter_hash: &VoterHash) -> Result<(), ApiError> {
        Ok(ElectionService::approve_voter(self, voter_hash)?)
    }

    fn suspend_voter(&self, voter_hash: &VoterHash) -> Result<(), ApiError> {
        Ok(ElectionService::suspend_voter(self, voter_hash)?)
    }

    fn submit_vote(
        &self,
        voter_id: &str,
        candidate: &str,
        timestamp: Option<Timestamp>,
    ) -> Result<TxHash, ApiError> {
        Ok(ElectionService::submit_vote(self, voter_id, candidate, timestamp)?)
    }

    fn chain(&self) -> Vec<Block> {
        self.chain_snapshot()
    }

    fn results(&self) -> BTreeMap<String, u64> {
        self.tally()
    }

    fn turnout(&self) -> f64 {
        ElectionService::turnout(self)
    }

    fn voters(&self) -> Vec<Voter> {
        ElectionService::voters(self)
    }

    fn audit(&self) -> Result<(), Vec<Violation>> {
        ElectionService::audit(self)
    }
}
