//! The election ledger — an append-only, hash-linked chain of vote blocks,
//! the pending-transaction pool that feeds it, and the aggregations derived
//! from it.

pub mod audit;
pub mod chain;
pub mod error;
pub mod genesis;
pub mod pool;
pub mod results;

pub use audit::{Violation, ViolationKind};
pub use chain::Chain;
pub use error::LedgerError;
pub use genesis::genesis_block;
pub use pool::PendingPool;
pub use results::ResultsAggregator;
