//! Axum server assembly.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::backend::ElectionBackend;
use crate::error::ApiError;
use crate::handlers;

/// Shared state for the HTTP handlers.
pub struct RpcState {
    pub backend: Arc<dyn ElectionBackend>,
    admin_key: String,
}

impl RpcState {
    pub fn new(backend: Arc<dyn ElectionBackend>, admin_key: String) -> Self {
        Self { backend, admin_key }
    }

    /// Opaque shared-secret check for admin-gated endpoints.
    pub fn require_admin(&self, supplied: &str) -> Result<(), ApiError> {
        if supplied == self.admin_key {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

/// The HTTP server the browser UI polls.
pub struct RpcServer {
    bind: String,
    port: u16,
    state: Arc<RpcState>,
}

impl RpcServer {
    pub fn new(
        bind: impl Into<String>,
        port: u16,
        backend: Arc<dyn ElectionBackend>,
        admin_key: String,
    ) -> Self {
        Self {
            bind: bind.into(),
            port,
            state: Arc::new(RpcState::new(backend, admin_key)),
        }
    }

    /// Build the router. CORS is permissive: the UI is served from another
    /// origin and polls these endpoints directly.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/chain", get(handlers::get_chain))
            .route("/results", get(handlers::get_results))
            .route("/turnout", get(handlers::get_turnout))
            .route("/voters", get(handlers::get_voters))
            .route("/validate", get(handlers::get_validate))
            .route("/register", post(handlers::post_register))
            .route("/approve_voter", post(handlers::post_approve_voter))
            .route("/suspend_voter", post(handlers::post_suspend_voter))
            .route("/vote", post(handlers::post_vote))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Serve until the shutdown signal fires.
    pub async fn start(&self, mut shutdown: broadcast::Receiver<()>) -> std::io::Result<()> {
        let addr = format!("{}:{}", self.bind, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("RPC server listening on {addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await
    }
}
