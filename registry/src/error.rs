use thiserror::Error;

use votechain_types::VoterStatus;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("voter already registered")]
    DuplicateVoter,

    #[error("voter not found")]
    NotFound,

    #[error("voter is {actual:?}, cannot {action}")]
    InvalidState {
        actual: VoterStatus,
        action: &'static str,
    },
}
