//! Route handler functions for all API endpoints.
//!
//! Each handler extracts its parameters via axum extractors, interacts with
//! AppState services, and returns JSON responses.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use floatchat_core::types::{ChatMessage, VisualizationResponse};

use crate::auth::{bearer_token, AuthSession, AuthUser};
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatTurnResponse {
    pub reply: String,
    pub visualization: VisualizationResponse,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct CurrentVisualizationResponse {
    pub visualization: Option<VisualizationResponse>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: AuthSession,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: AuthUser,
}

// =============================================================================
// Chat handlers
// =============================================================================

/// POST /chat - submit a user message.
///
/// Returns the relay reply (marker stripped) plus the visualization
/// synthesized from the raw query.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatTurnResponse>, ApiError> {
    let turn = state.orchestrator.handle_message(&req.message).await?;
    Ok(Json(ChatTurnResponse {
        reply: turn.reply,
        visualization: turn.visualization,
    }))
}

/// GET /chat/history - the full conversation log.
pub async fn chat_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let messages = state.orchestrator.history()?;
    Ok(Json(HistoryResponse { messages }))
}

/// DELETE /chat/history - reset the conversation.
pub async fn clear_history(State(state): State<AppState>) -> Result<(), ApiError> {
    state.orchestrator.clear()?;
    Ok(())
}

/// GET /chat/visualization - the current visualization, if any.
pub async fn current_visualization(
    State(state): State<AppState>,
) -> Result<Json<CurrentVisualizationResponse>, ApiError> {
    let visualization = state.orchestrator.current_visualization()?;
    Ok(Json(CurrentVisualizationResponse { visualization }))
}

// =============================================================================
// Auth handlers
// =============================================================================

/// POST /auth/signup - create an account with the hosted provider.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.auth.sign_up(&req.email, &req.password).await?;
    Ok(Json(SessionResponse { session }))
}

/// POST /auth/signin - exchange credentials for a provider session.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.auth.sign_in(&req.email, &req.password).await?;
    Ok(Json(SessionResponse { session }))
}

/// POST /auth/signout - revoke the caller's provider session.
pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(), ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;
    state.auth.sign_out(token).await?;
    Ok(())
}

/// GET /auth/user - the user behind the caller's bearer token.
pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;
    let user = state
        .auth
        .current_user(token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))?;
    Ok(Json(UserResponse { user }))
}

// =============================================================================
// Health
// =============================================================================

/// GET /health - liveness and uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
