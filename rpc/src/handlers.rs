//! Request/response shapes and handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use votechain_types::{Block, Timestamp, Voter, VoterHash, VoterMetadata};

use crate::error::ApiError;
use crate::server::RpcState;

// ── Wire shapes ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct TurnoutResponse {
    pub turnout: f64,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub violations: Vec<ViolationEntry>,
}

#[derive(Serialize)]
pub struct ViolationEntry {
    pub index: u64,
    pub reason: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub voter_id: String,
    #[serde(flatten)]
    pub metadata: VoterMetadata,
    pub admin_key: String,
}

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub voter_hash: VoterHash,
    pub admin_key: String,
}

#[derive(Deserialize)]
pub struct SuspendRequest {
    pub voter_hash: VoterHash,
    pub admin_key: String,
}

#[derive(Deserialize)]
pub struct VoteRequest {
    pub voter_id: String,
    pub candidate: String,
    /// Client clocks send fractional seconds; the intake layer truncates.
    #[serde(default)]
    pub timestamp: Option<f64>,
}

// ── Read handlers ───────────────────────────────────────────────────────

pub async fn get_chain(State(state): State<Arc<RpcState>>) -> Json<ChainResponse> {
    let chain = state.backend.chain();
    let length = chain.len();
    Json(ChainResponse { chain, length })
}

pub async fn get_results(State(state): State<Arc<RpcState>>) -> Json<BTreeMap<String, u64>> {
    Json(state.backend.results())
}

pub async fn get_turnout(State(state): State<Arc<RpcState>>) -> Json<TurnoutResponse> {
    Json(TurnoutResponse {
        turnout: state.backend.turnout(),
    })
}

pub async fn get_voters(State(state): State<Arc<RpcState>>) -> Json<Vec<Voter>> {
    Json(state.backend.voters())
}

pub async fn get_validate(State(state): State<Arc<RpcState>>) -> Json<ValidateResponse> {
    match state.backend.audit() {
        Ok(()) => Json(ValidateResponse {
            valid: true,
            violations: Vec::new(),
        }),
        Err(violations) => {
            tracing::warn!(count = violations.len(), "chain audit found violations");
            Json(ValidateResponse {
                valid: false,
                violations: violations
                    .into_iter()
                    .map(|v| ViolationEntry {
                        index: v.index,
                        reason: v.kind.to_string(),
                    })
                    .collect(),
            })
        }
    }
}

// ── Write handlers ──────────────────────────────────────────────────────

pub async fn post_register(
    State(state): State<Arc<RpcState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.require_admin(&req.admin_key)?;
    if req.voter_id.is_empty() {
        return Err(ApiError::BadRequest("Voter ID required".into()));
    }

    let hashed = state.backend.register_voter(&req.voter_id, req.metadata)?;
    tracing::info!(voter = %hashed, "voter registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Voter registered successfully".into(),
        }),
    ))
}

pub async fn post_approve_voter(
    State(state): State<Arc<RpcState>>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.require_admin(&req.admin_key)?;
    state.backend.approve_voter(&req.voter_hash)?;
    tracing::info!(voter = %req.voter_hash, "voter approved");
    Ok(Json(MessageResponse {
        message: "Voter approved successfully".into(),
    }))
}

pub async fn post_suspend_voter(
    State(state): State<Arc<RpcState>>,
    Json(req): Json<SuspendRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.require_admin(&req.admin_key)?;
    state.backend.suspend_voter(&req.voter_hash)?;
    tracing::info!(voter = %req.voter_hash, "voter suspended");
    Ok(Json(MessageResponse {
        message: "Voter suspended successfully".into(),
    }))
}

pub async fn post_vote(
    State(state): State<Arc<RpcState>>,
    Json(req): Json<VoteRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if req.voter_id.is_empty() || req.candidate.is_empty() {
        return Err(ApiError::BadRequest("Missing fields".into()));
    }

    let timestamp = req.timestamp.map(|secs| Timestamp::new(secs as u64));
    let tx_hash = state
        .backend
        .submit_vote(&req.voter_id, &req.candidate, timestamp)?;
    tracing::info!(tx = %tx_hash, candidate = %req.candidate, "vote accepted");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Vote added successfully".into(),
        }),
    ))
}
