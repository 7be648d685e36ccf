//! JSON HTTP server for the election ledger.
//!
//! Serves the contract the browser UI polls:
//! - chain, results, turnout and voter listings
//! - vote submission
//! - admin-gated registration, approval and suspension
//! - on-demand chain integrity audit
//!
//! The server talks to the node through the [`ElectionBackend`] trait so
//! this crate never depends on the node's internals.

pub mod backend;
pub mod error;
pub mod handlers;
pub mod server;

pub use backend::ElectionBackend;
pub use error::ApiError;
pub use server::{RpcServer, RpcState};
