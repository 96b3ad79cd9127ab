//! Authentication pass-through to the hosted identity provider.
//!
//! Sign-up, sign-in, sign-out, and current-user retrieval are delegated
//! wholesale to the hosted service; this crate only reacts to its
//! user-present/absent state. The provider sits behind a narrow trait so
//! tests can swap in a local stub.

use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use floatchat_core::config::AuthConfig;

use crate::state::AppState;

// =============================================================================
// Types
// =============================================================================

/// A signed-in user as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// A provider session. `access_token` is absent when the provider requires
/// email confirmation before issuing one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: Option<String>,
    pub user: AuthUser,
}

/// Failures from the identity provider boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("auth provider is not configured")]
    NotConfigured,
    #[error("credentials rejected: {0}")]
    InvalidCredentials(String),
    #[error("auth provider error: {0}")]
    Provider(String),
    #[error("auth request failed: {0}")]
    Network(String),
}

// =============================================================================
// AuthProvider trait
// =============================================================================

/// Capability set delegated to the hosted identity service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
    /// Resolve a bearer token to a user. `None` means the token is missing,
    /// expired, or revoked - not an error.
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError>;
}

// =============================================================================
// HostedAuthClient
// =============================================================================

/// Reqwest-backed client for a GoTrue-style hosted identity endpoint.
pub struct HostedAuthClient {
    client: reqwest::Client,
    config: AuthConfig,
}

impl HostedAuthClient {
    pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn is_configured(&self) -> bool {
        !self.config.project_url.trim().is_empty() && !self.config.anon_key.trim().is_empty()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.project_url.trim_end_matches('/'), path)
    }

    async fn credential_request(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        if !self.is_configured() {
            return Err(AuthError::NotConfigured);
        }

        let response = self
            .client
            .post(self.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials(provider_detail(&body)));
        }
        if !status.is_success() {
            return Err(AuthError::Provider(provider_detail(&body)));
        }

        parse_session(&body)
    }
}

/// Extract a human-readable detail from a provider error body.
fn provider_detail(body: &Value) -> String {
    for key in ["error_description", "msg", "message"] {
        if let Some(detail) = body.get(key).and_then(Value::as_str) {
            return detail.to_string();
        }
    }
    "Unknown error".to_string()
}

fn parse_user(value: &Value) -> Option<AuthUser> {
    Some(AuthUser {
        id: value.get("id")?.as_str()?.to_string(),
        email: value
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Parse a session body: either `{access_token, user}` or a bare user
/// (sign-up with email confirmation pending).
fn parse_session(body: &Value) -> Result<AuthSession, AuthError> {
    let access_token = body
        .get("access_token")
        .and_then(Value::as_str)
        .map(str::to_string);

    let user = body
        .get("user")
        .and_then(parse_user)
        .or_else(|| parse_user(body))
        .ok_or_else(|| AuthError::Provider("response carried no user".to_string()))?;

    Ok(AuthSession { access_token, user })
}

#[async_trait]
impl AuthProvider for HostedAuthClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.credential_request("signup", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.credential_request("token?grant_type=password", email, password)
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        if !self.is_configured() {
            return Err(AuthError::NotConfigured);
        }

        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        // An already-expired token is a successful sign-out.
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            Err(AuthError::Provider(provider_detail(&body)))
        }
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        if !self.is_configured() {
            return Err(AuthError::NotConfigured);
        }

        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            return Err(AuthError::Provider(provider_detail(&body)));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(parse_user(&body))
    }
}

// =============================================================================
// Middleware
// =============================================================================

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Middleware that resolves the bearer token to a user via the provider.
///
/// Returns 401 when the header is missing or the provider reports no user;
/// on success the [`AuthUser`] is stored in request extensions.
pub async fn require_user(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = match bearer_token(req.headers()) {
        Some(token) => token.to_string(),
        None => {
            return unauthorized("Missing Authorization header");
        }
    };

    match state.auth.current_user(&token).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(None) => unauthorized("Invalid or expired token"),
        Err(e) => {
            tracing::warn!(error = %e, "Auth provider lookup failed");
            crate::error::ApiError::from(e).into_response()
        }
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

// =============================================================================
// MockAuth
// =============================================================================

/// In-memory provider for tests: one account, one fixed token.
pub struct MockAuth {
    pub email: String,
    pub password: String,
    pub token: String,
}

impl MockAuth {
    pub fn new(email: &str, password: &str, token: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            token: token.to_string(),
        }
    }

    fn user(&self) -> AuthUser {
        AuthUser {
            id: "mock-user".to_string(),
            email: self.email.clone(),
        }
    }
}

#[async_trait]
impl AuthProvider for MockAuth {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<AuthSession, AuthError> {
        Ok(AuthSession {
            access_token: Some(self.token.clone()),
            user: AuthUser {
                id: "mock-user".to_string(),
                email: email.to_string(),
            },
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        if email == self.email && password == self.password {
            Ok(AuthSession {
                access_token: Some(self.token.clone()),
                user: self.user(),
            })
        } else {
            Err(AuthError::InvalidCredentials(
                "Invalid login credentials".to_string(),
            ))
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        if access_token == self.token {
            Ok(Some(self.user()))
        } else {
            Ok(None)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
