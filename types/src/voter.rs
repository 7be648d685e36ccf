//! Voter records and the eligibility state machine.

use serde::{Deserialize, Serialize};

use crate::hash::VoterHash;

/// The eligibility status of a registered voter.
///
/// Registration creates a voter as `Pending`; an explicit admin approval
/// moves it to `Active`. `Suspended` is an administrative override and is
/// terminal for vote intake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoterStatus {
    /// Registered, awaiting admin approval.
    Pending,
    /// Approved — may cast exactly one vote.
    Active,
    /// Administratively barred from voting.
    Suspended,
}

impl VoterStatus {
    /// Whether a vote from this voter may be accepted.
    pub fn can_vote(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Registration metadata supplied alongside the voter ID.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VoterMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub age: u32,
}

/// A registered voter as held by the registry and rendered by `/voters`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    /// The externally supplied identifier, unique per voter.
    pub original_id: String,
    /// One-way derived identifier used in transactions.
    pub hashed_id: VoterHash,
    pub name: String,
    pub email: String,
    pub place: String,
    pub age: u32,
    pub status: VoterStatus,
}

impl Voter {
    pub fn new(original_id: String, hashed_id: VoterHash, metadata: VoterMetadata) -> Self {
        Self {
            original_id,
            hashed_id,
            name: metadata.name,
            email: metadata.email,
            place: metadata.place,
            age: metadata.age,
            status: VoterStatus::Pending,
        }
    }
}
