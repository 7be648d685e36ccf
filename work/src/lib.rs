//! Proof-of-work for block production.
//!
//! Block creation requires a nonce whose resulting block hash carries a
//! configured number of leading zero bits. The search is sequential from
//! nonce 0, so mining the same batch against the same tip always lands on
//! the same nonce and hash — reproducible and directly testable.

pub mod difficulty;
pub mod error;
pub mod miner;

pub use difficulty::{leading_zero_bits, meets_difficulty};
pub use error::WorkError;
pub use miner::Miner;
