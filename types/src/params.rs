//! Election parameters — the configured candidate set and mining policy.
//!
//! Difficulty is a static configuration value; there is no retargeting.

use serde::{Deserialize, Serialize};

/// Parameters governing vote intake and mining.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectionParams {
    /// The closed set of candidate labels votes may name.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
    /// Required number of leading zero bits in a block hash.
    #[serde(default = "default_difficulty_bits")]
    pub difficulty_bits: u8,
    /// Upper bound on transactions mined into one block; keeps block time
    /// bounded regardless of backlog depth.
    #[serde(default = "default_max_block_transactions")]
    pub max_block_transactions: usize,
}

fn default_candidates() -> Vec<String> {
    vec![
        "Candidate A".to_string(),
        "Candidate B".to_string(),
        "Candidate C".to_string(),
        "Candidate D".to_string(),
    ]
}

fn default_difficulty_bits() -> u8 {
    12
}

fn default_max_block_transactions() -> usize {
    16
}

impl ElectionParams {
    /// Production-leaning defaults.
    pub fn defaults() -> Self {
        Self {
            candidates: default_candidates(),
            difficulty_bits: default_difficulty_bits(),
            max_block_transactions: default_max_block_transactions(),
        }
    }

    /// Low difficulty for local development and tests.
    pub fn dev_defaults() -> Self {
        Self {
            difficulty_bits: 4,
            ..Self::defaults()
        }
    }

    pub fn is_candidate(&self, label: &str) -> bool {
        self.candidates.iter().any(|c| c == label)
    }
}

impl Default for ElectionParams {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_candidate_set_is_closed() {
        let params = ElectionParams::defaults();
        assert!(params.is_candidate("Candidate A"));
        assert!(!params.is_candidate("Candidate Z"));
        assert!(!params.is_candidate(""));
    }

    #[test]
    fn dev_defaults_lower_difficulty_only() {
        let dev = ElectionParams::dev_defaults();
        let prod = ElectionParams::defaults();
        assert!(dev.difficulty_bits < prod.difficulty_bits);
        assert_eq!(dev.candidates, prod.candidates);
    }
}
