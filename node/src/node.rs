//! The running node — owns the service, the miner task and the RPC server.
//!
//! Lifecycle: build from config (creates the genesis chain), `run` until a
//! shutdown signal, then stop the miner and drain the server.

use std::sync::Arc;

use tracing::info;

use votechain_rpc::RpcServer;
use votechain_work::Miner;

use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::miner_task::run_miner;
use crate::service::ElectionService;
use crate::shutdown::ShutdownController;

pub struct VoteNode {
    config: NodeConfig,
    service: Arc<ElectionService>,
    shutdown: Arc<ShutdownController>,
}

impl VoteNode {
    pub fn new(config: NodeConfig) -> Self {
        let service = Arc::new(ElectionService::new(config.params.clone()));
        Self {
            config,
            service,
            shutdown: Arc::new(ShutdownController::new()),
        }
    }

    pub fn service(&self) -> Arc<ElectionService> {
        self.service.clone()
    }

    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        self.shutdown.clone()
    }

    /// Run until SIGINT/SIGTERM or a programmatic shutdown.
    pub async fn run(&self) -> Result<(), NodeError> {
        info!(
            bind = %self.config.bind,
            port = self.config.rpc_port,
            difficulty_bits = self.config.params.difficulty_bits,
            candidates = self.config.params.candidates.len(),
            "starting votechain node"
        );

        let miner = Miner::new(self.config.params.difficulty_bits);
        let miner_handle = tokio::spawn(run_miner(
            self.service.clone(),
            miner,
            self.shutdown.subscribe(),
        ));

        let rpc = RpcServer::new(
            self.config.bind.clone(),
            self.config.rpc_port,
            self.service.clone(),
            self.config.admin_key.clone(),
        );
        let rpc_shutdown = self.shutdown.subscribe();
        let rpc_handle = tokio::spawn(async move { rpc.start(rpc_shutdown).await });

        let mut programmatic = self.shutdown.subscribe();
        tokio::select! {
            _ = self.shutdown.wait_for_signal() => {}
            _ = programmatic.recv() => {}
        }
        self.service.request_stop();

        miner_handle.await.map_err(|e| NodeError::Other(e.to_string()))?;
        rpc_handle
            .await
            .map_err(|e| NodeError::Other(e.to_string()))??;

        info!("node stopped cleanly");
        Ok(())
    }
}
