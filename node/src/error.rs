use thiserror::Error;

use votechain_ledger::LedgerError;
use votechain_registry::RegistryError;
use votechain_types::VoterStatus;
use votechain_work::WorkError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("voter not registered")]
    VoterNotFound,

    #[error("voter is not eligible to vote (status {status:?})")]
    VoterNotEligible { status: VoterStatus },

    #[error("unknown candidate: {0}")]
    InvalidCandidate(String),

    #[error("voter has already voted")]
    DuplicateVote,

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("work error: {0}")]
    Work(#[from] WorkError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
