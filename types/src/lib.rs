//! Fundamental types for the votechain ledger: hashes, timestamps, voters,
//! vote transactions, blocks and election parameters.

pub mod block;
pub mod hash;
pub mod params;
pub mod time;
pub mod transaction;
pub mod voter;

pub use block::Block;
pub use hash::{BlockHash, TxHash, VoterHash};
pub use params::ElectionParams;
pub use time::Timestamp;
pub use transaction::VoteTransaction;
pub use voter::{Voter, VoterMetadata, VoterStatus};
