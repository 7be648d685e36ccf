use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkError {
    #[error("previous block carries no sealed hash")]
    InvalidPrevious,

    #[error("work search cancelled")]
    Cancelled,
}
