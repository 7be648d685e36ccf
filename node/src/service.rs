//! The election service — the single authoritative ledger instance shared
//! by all request handlers and the background miner.
//!
//! Two locks guard the shared state: the registry, and the ledger
//! (chain + pending pool together, so "check then enqueue" and "mine then
//! append" are serialized against each other as one writer). Lock order is
//! registry before ledger wherever both are held.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Notify;
use tracing::{error, info, warn};

use votechain_ledger::{Chain, PendingPool, ResultsAggregator, Violation};
use votechain_registry::VoterRegistry;
use votechain_types::{
    Block, BlockHash, ElectionParams, Timestamp, TxHash, VoteTransaction, Voter, VoterHash,
    VoterMetadata, VoterStatus,
};
use votechain_work::{Miner, WorkError};

use crate::error::NodeError;

/// Chain and pending pool, guarded together.
struct LedgerState {
    chain: Chain,
    pool: PendingPool,
}

/// Result of one mining round.
#[derive(Debug, PartialEq, Eq)]
pub enum MineOutcome {
    /// A block was mined and appended as the new tip.
    Committed(BlockHash),
    /// The tip advanced (or a stop was requested) during the search; the
    /// found work was discarded.
    Stale,
    /// The pool was empty; nothing to mine.
    Idle,
}

pub struct ElectionService {
    params: ElectionParams,
    registry: RwLock<VoterRegistry>,
    ledger: RwLock<LedgerState>,
    results: ResultsAggregator,
    /// Bumped on every append; a mining round that started against an older
    /// value is stale.
    tip_version: AtomicU64,
    /// Raised on shutdown so an in-flight nonce search aborts promptly.
    stop: AtomicBool,
    work_notify: Notify,
}

impl ElectionService {
    pub fn new(params: ElectionParams) -> Self {
        let chain = Chain::new(params.difficulty_bits);
        let results = ResultsAggregator::new(params.candidates.clone());
        Self {
            params,
            registry: RwLock::new(VoterRegistry::new()),
            ledger: RwLock::new(LedgerState {
                chain,
                pool: PendingPool::new(),
            }),
            results,
            tip_version: AtomicU64::new(0),
            stop: AtomicBool::new(false),
            work_notify: Notify::new(),
        }
    }

    pub fn params(&self) -> &ElectionParams {
        &self.params
    }

    // ── Registry operations ────────────────────────────────────────────

    pub fn register_voter(
        &self,
        original_id: &str,
        metadata: VoterMetadata,
    ) -> Result<VoterHash, NodeError> {
        let hashed = self.registry_write().register(original_id, metadata)?;
        Ok(hashed)
    }

    pub fn approve_voter(&self, hashed_id: &VoterHash) -> Result<(), NodeError> {
        self.registry_write().approve(hashed_id)?;
        Ok(())
    }

    pub fn suspend_voter(&self, hashed_id: &VoterHash) -> Result<(), NodeError> {
        self.registry_write().suspend(hashed_id)?;
        Ok(())
    }

    pub fn voters(&self) -> Vec<Voter> {
        self.registry_read().list()
    }

    pub fn voter_status(&self, hashed_id: &VoterHash) -> Result<VoterStatus, NodeError> {
        Ok(self.registry_read().status_of(hashed_id)?)
    }

    // ── Vote intake ────────────────────────────────────────────────────

    /// Validate and enqueue a vote.
    ///
    /// The duplicate check and the enqueue happen under one writer lock, so
    /// two concurrent submissions for the same voter cannot both pass.
    pub fn submit_vote(
        &self,
        voter_id: &str,
        candidate: &str,
        timestamp: Option<Timestamp>,
    ) -> Result<TxHash, NodeError> {
        let (hashed, status) = {
            let registry = self.registry_read();
            let voter = registry.resolve(voter_id).ok_or(NodeError::VoterNotFound)?;
            (voter.hashed_id, voter.status)
        };
        if !status.can_vote() {
            return Err(NodeError::VoterNotEligible { status });
        }
        if !self.params.is_candidate(candidate) {
            return Err(NodeError::InvalidCandidate(candidate.to_string()));
        }

        let tx_hash = {
            let mut ledger = self.ledger_write();
            if ledger.chain.is_halted() {
                return Err(votechain_ledger::LedgerError::Halted.into());
            }
            if ledger.chain.has_voted(&hashed) || ledger.pool.contains(&hashed) {
                return Err(NodeError::DuplicateVote);
            }
            let tx = VoteTransaction::new(
                hashed,
                candidate,
                timestamp.unwrap_or_else(Timestamp::now),
            );
            let tx_hash = tx.hash;
            ledger.pool.push(tx);
            tx_hash
        };

        self.work_notify.notify_one();
        Ok(tx_hash)
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn chain_snapshot(&self) -> Vec<Block> {
        self.ledger_read().chain.blocks().to_vec()
    }

    pub fn chain_len(&self) -> usize {
        self.ledger_read().chain.len()
    }

    pub fn tip_hash(&self) -> BlockHash {
        self.ledger_read().chain.tip().hash
    }

    pub fn pending_count(&self) -> usize {
        self.ledger_read().pool.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.ledger_read().pool.is_empty()
    }

    pub fn tally(&self) -> BTreeMap<String, u64> {
        self.results.tally(&self.ledger_read().chain)
    }

    pub fn turnout(&self) -> f64 {
        let active = self.registry_read().active_count();
        self.results.turnout(&self.ledger_read().chain, active)
    }

    /// Audit the chain. Violations halt the ledger: appends are refused
    /// until an operator restarts with a clean chain.
    pub fn audit(&self) -> Result<(), Vec<Violation>> {
        let outcome = self.ledger_read().chain.audit();
        if let Err(ref violations) = outcome {
            error!(count = violations.len(), "integrity audit failed; halting ledger");
            for violation in violations {
                error!(%violation, "audit violation");
            }
            self.ledger_write().chain.halt();
        }
        outcome
    }

    // ── Mining ─────────────────────────────────────────────────────────

    pub fn tip_version(&self) -> u64 {
        self.tip_version.load(Ordering::Acquire)
    }

    /// Ask any in-flight nonce search to abort at its next check.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
        self.work_notify.notify_one();
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Resolves when the pool may have new work.
    pub async fn work_available(&self) {
        self.work_notify.notified().await;
    }

    /// Snapshot a batch, the current tip and the tip version for a mining
    /// round. `None` when the pool is empty.
    fn mining_snapshot(&self) -> Option<(Vec<VoteTransaction>, Block, u64)> {
        let ledger = self.ledger_read();
        if ledger.pool.is_empty() {
            return None;
        }
        let batch = ledger.pool.next_batch(self.params.max_block_transactions);
        let previous = ledger.chain.tip().clone();
        Some((batch, previous, self.tip_version()))
    }

    /// Append a mined block if the tip has not moved since the snapshot.
    fn commit(&self, block: Block, based_on_version: u64) -> Result<MineOutcome, NodeError> {
        let mut ledger = self.ledger_write();
        if self.tip_version() != based_on_version {
            return Ok(MineOutcome::Stale);
        }
        let hash = block.hash;
        let committed = block.transactions.clone();
        ledger.chain.append(block)?;
        let cleared = ledger.pool.remove_committed(&committed);
        self.tip_version.fetch_add(1, Ordering::AcqRel);
        info!(
            block = %hash,
            transactions = committed.len(),
            cleared,
            height = ledger.chain.len(),
            "block appended"
        );
        Ok(MineOutcome::Committed(hash))
    }

    /// Run one full mining round: snapshot, search, commit.
    ///
    /// Blocking — call from a blocking context. The search aborts when the
    /// tip moves underneath it or a stop is requested; stale work is
    /// discarded, never committed.
    pub fn mine_pending(&self, miner: &Miner) -> Result<MineOutcome, NodeError> {
        let Some((batch, previous, version)) = self.mining_snapshot() else {
            return Ok(MineOutcome::Idle);
        };

        let cancel = || self.stop_requested() || self.tip_version() != version;
        match miner.mine(batch, &previous, Timestamp::now(), cancel) {
            Ok(block) => self.commit(block, version),
            Err(WorkError::Cancelled) => {
                warn!("nonce search cancelled (stale tip or stop request)");
                Ok(MineOutcome::Stale)
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Lock helpers ───────────────────────────────────────────────────

    fn registry_read(&self) -> RwLockReadGuard<'_, VoterRegistry> {
        self.registry.read().expect("registry lock poisoned")
    }

    fn registry_write(&self) -> RwLockWriteGuard<'_, VoterRegistry> {
        self.registry.write().expect("registry lock poisoned")
    }

    fn ledger_read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.ledger.read().expect("ledger lock poisoned")
    }

    fn ledger_write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.ledger.write().expect("ledger lock poisoned")
    }
}
