//! Identity derivation for the votechain ledger.

pub mod identity;

pub use identity::derive_voter_hash;
