//! The voter registry — registration, approval and suspension.
//!
//! The registry exclusively owns voter status. The intake path only reads
//! the eligibility decision; nothing outside this module writes a status.

use std::collections::HashMap;

use votechain_crypto::derive_voter_hash;
use votechain_types::{Voter, VoterHash, VoterMetadata, VoterStatus};

use crate::error::RegistryError;

/// Registry of voters, keyed by derived hash, preserving registration order.
pub struct VoterRegistry {
    voters: Vec<Voter>,
    by_hash: HashMap<VoterHash, usize>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self {
            voters: Vec::new(),
            by_hash: HashMap::new(),
        }
    }

    /// Register a new voter.
    ///
    /// Derives the one-way identifier, stores the voter as `Pending` and
    /// returns the derived hash. Duplicate detection is by derived hash,
    /// which is equivalent to by raw ID since the derivation is injective
    /// in practice.
    pub fn register(
        &mut self,
        original_id: &str,
        metadata: VoterMetadata,
    ) -> Result<VoterHash, RegistryError> {
        let hashed_id = derive_voter_hash(original_id);
        if self.by_hash.contains_key(&hashed_id) {
            return Err(RegistryError::DuplicateVoter);
        }

        let voter = Voter::new(original_id.to_string(), hashed_id, metadata);
        self.by_hash.insert(hashed_id, self.voters.len());
        self.voters.push(voter);
        Ok(hashed_id)
    }

    /// Approve a pending voter, making them eligible to vote.
    ///
    /// Already-`Active` voters succeed as a no-op so admin-UI retries are
    /// harmless; `Suspended` voters cannot be re-approved.
    pub fn approve(&mut self, hashed_id: &VoterHash) -> Result<(), RegistryError> {
        let voter = self.get_mut(hashed_id)?;
        match voter.status {
            VoterStatus::Pending => {
                voter.status = VoterStatus::Active;
                Ok(())
            }
            VoterStatus::Active => Ok(()),
            VoterStatus::Suspended => Err(RegistryError::InvalidState {
                actual: VoterStatus::Suspended,
                action: "approve",
            }),
        }
    }

    /// Suspend a voter. Idempotent; suspension is terminal for intake.
    pub fn suspend(&mut self, hashed_id: &VoterHash) -> Result<(), RegistryError> {
        let voter = self.get_mut(hashed_id)?;
        voter.status = VoterStatus::Suspended;
        Ok(())
    }

    /// Current status of a voter.
    pub fn status_of(&self, hashed_id: &VoterHash) -> Result<VoterStatus, RegistryError> {
        self.get(hashed_id)
            .map(|v| v.status)
            .ok_or(RegistryError::NotFound)
    }

    /// Look up a voter by derived hash.
    pub fn get(&self, hashed_id: &VoterHash) -> Option<&Voter> {
        self.by_hash.get(hashed_id).map(|&i| &self.voters[i])
    }

    /// Look up a voter by the raw registration ID.
    pub fn resolve(&self, original_id: &str) -> Option<&Voter> {
        self.get(&derive_voter_hash(original_id))
    }

    /// Snapshot of all voters in registration order.
    pub fn list(&self) -> Vec<Voter> {
        self.voters.clone()
    }

    /// Number of voters currently eligible to vote.
    pub fn active_count(&self) -> usize {
        self.voters
            .iter()
            .filter(|v| v.status.can_vote())
            .count()
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    fn get_mut(&mut self, hashed_id: &VoterHash) -> Result<&mut Voter, RegistryError> {
        match self.by_hash.get(hashed_id) {
            Some(&i) => Ok(&mut self.voters[i]),
            None => Err(RegistryError::NotFound),
        }
    }
}

impl Default for VoterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
