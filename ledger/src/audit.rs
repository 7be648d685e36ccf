//! Full-chain integrity audit.
//!
//! Reports every violation found rather than stopping at the first, so an
//! operator sees the complete damage in one pass. Hash recomputation is the
//! expensive part and is fanned out across cores.

use std::collections::HashSet;
use std::fmt;

use rayon::prelude::*;

use votechain_types::Block;
use votechain_work::meets_difficulty;

/// What went wrong inside a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// Genesis does not have the fixed shape (index 0, no transactions,
    /// zero previous-hash sentinel).
    MalformedGenesis,
    /// `previous_hash` does not match the predecessor's hash.
    BrokenLink,
    /// Index is not the predecessor's index + 1.
    IndexGap,
    /// Stored block hash does not match a fresh recomputation.
    HashMismatch,
    /// A transaction's stored hash does not match its contents.
    TransactionHashMismatch,
    /// The block hash fails the difficulty predicate.
    InsufficientWork,
    /// A voter hash appears in more than one committed transaction.
    DuplicateVoter,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MalformedGenesis => "genesis block has the wrong shape",
            Self::BrokenLink => "previous_hash does not match the predecessor",
            Self::IndexGap => "index does not follow the predecessor",
            Self::HashMismatch => "stored hash does not match block contents",
            Self::TransactionHashMismatch => "a transaction does not match its stored hash",
            Self::InsufficientWork => "hash does not satisfy the difficulty predicate",
            Self::DuplicateVoter => "voter already has a committed vote in an earlier block",
        };
        f.write_str(text)
    }
}

/// A single audit finding, anchored to the offending block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub index: u64,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {}: {}", self.index, self.kind)
    }
}

/// Audit a block sequence. Returns all violations, ordered by block index.
pub fn audit_blocks(blocks: &[Block], difficulty_bits: u8) -> Vec<Violation> {
    let mut violations = Vec::new();

    let Some(genesis) = blocks.first() else {
        return violations;
    };

    if genesis.index != 0
        || !genesis.transactions.is_empty()
        || !genesis.previous_hash.is_zero()
    {
        violations.push(Violation {
            index: genesis.index,
            kind: ViolationKind::MalformedGenesis,
        });
    }

    // Per-block recomputation, parallelized; genesis is exempt from the
    // difficulty predicate but not from hash correctness.
    let recompute: Vec<Violation> = blocks
        .par_iter()
        .flat_map_iter(|block| {
            let mut found = Vec::new();
            for tx in &block.transactions {
                if tx.hash != tx.compute_hash() {
                    found.push(Violation {
                        index: block.index,
                        kind: ViolationKind::TransactionHashMismatch,
                    });
                }
            }
            if block.hash != block.compute_hash() {
                found.push(Violation {
                    index: block.index,
                    kind: ViolationKind::HashMismatch,
                });
            } else if !block.is_genesis() && !meets_difficulty(&block.hash, difficulty_bits) {
                found.push(Violation {
                    index: block.index,
                    kind: ViolationKind::InsufficientWork,
                });
            }
            found
        })
        .collect();
    violations.extend(recompute);

    // Linkage between consecutive blocks.
    for pair in blocks.windows(2) {
        let (prev, block) = (&pair[0], &pair[1]);
        if block.index != prev.index + 1 {
            violations.push(Violation {
                index: block.index,
                kind: ViolationKind::IndexGap,
            });
        }
        if block.previous_hash != prev.hash {
            violations.push(Violation {
                index: block.index,
                kind: ViolationKind::BrokenLink,
            });
        }
    }

    // Global vote uniqueness.
    let mut seen = HashSet::new();
    for block in blocks {
        for tx in &block.transactions {
            if !seen.insert(tx.voter) {
                violations.push(Violation {
                    index: block.index,
                    kind: ViolationKind::DuplicateVoter,
                });
            }
        }
    }

    violations.sort_by_key(|v| v.index);
    violations
}
