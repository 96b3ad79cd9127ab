//! FloatChat API crate - axum HTTP server and route handlers.
//!
//! Provides the REST API for the FloatChat service: chat turns, conversation
//! history, the current visualization, health checks, and the pass-through
//! endpoints for the hosted identity provider.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::{AuthProvider, AuthUser, HostedAuthClient, MockAuth};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
