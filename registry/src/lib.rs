//! Voter registry — who may transact, and in what state.

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::VoterRegistry;
