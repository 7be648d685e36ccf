use thiserror::Error;

use votechain_types::VoterHash;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid linkage: {reason}")]
    InvalidLinkage { reason: String },

    #[error("invalid proof: {reason}")]
    InvalidProof { reason: String },

    #[error("voter {voter} already has a committed vote")]
    DuplicateVoteInChain { voter: VoterHash },

    #[error("ledger is halted after an integrity violation")]
    Halted,
}
