//! The background miner.
//!
//! Wakes when the pool gains work, runs the nonce search on the blocking
//! pool, and drains the backlog one capped block at a time. A search whose
//! tip went stale is simply restarted against the new tip.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, error, info};

use votechain_work::Miner;

use crate::service::{ElectionService, MineOutcome};

pub async fn run_miner(
    service: Arc<ElectionService>,
    miner: Miner,
    mut shutdown: broadcast::Receiver<()>,
) {
    info!(
        difficulty_bits = miner.difficulty_bits(),
        "miner task started"
    );

    'outer: loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = service.work_available() => {}
        }

        while service.has_pending() && !service.stop_requested() {
            let svc = service.clone();
            let mut handle = tokio::task::spawn_blocking(move || svc.mine_pending(&miner));

            let result = tokio::select! {
                _ = shutdown.recv() => {
                    service.request_stop();
                    let _ = (&mut handle).await;
                    break 'outer;
                }
                result = &mut handle => result,
            };

            match result {
                Ok(Ok(MineOutcome::Committed(hash))) => {
                    debug!(block = %hash, "mining round committed");
                }
                Ok(Ok(MineOutcome::Stale)) => {
                    debug!("mining round went stale, restarting against new tip");
                }
                Ok(Ok(MineOutcome::Idle)) => break,
                Ok(Err(e)) => {
                    // Recoverable: log and keep serving. The vote stays
                    // pending and the next wakeup retries.
                    error!("mining round failed: {e}");
                    break;
                }
                Err(e) => {
                    error!("mining task join error: {e}");
                    break;
                }
            }
        }

        if service.stop_requested() {
            break;
        }
    }

    info!("miner task stopped");
}
