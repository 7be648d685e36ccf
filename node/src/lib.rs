//! The votechain node: owns the registry, chain and pending pool behind a
//! single service object, runs the background miner, and exposes the whole
//! thing to the RPC layer.

pub mod config;
pub mod error;
pub mod miner_task;
pub mod node;
pub mod rpc_bridge;
pub mod service;
pub mod shutdown;

pub use config::NodeConfig;
pub use error::NodeError;
pub use node::VoteNode;
pub use service::{ElectionService, MineOutcome};
pub use shutdown::ShutdownController;
