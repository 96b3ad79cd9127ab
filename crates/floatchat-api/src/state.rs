//! Application state shared across all route handlers.
//!
//! AppState holds references to the orchestrator, the auth provider, and the
//! configuration. It is passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use floatchat_chat::ChatOrchestrator;
use floatchat_core::FloatChatConfig;

use crate::auth::AuthProvider;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<FloatChatConfig>,
    /// The conversation orchestrator (classifier + relay + owned state).
    pub orchestrator: Arc<ChatOrchestrator>,
    /// Hosted identity provider.
    pub auth: Arc<dyn AuthProvider>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the given components.
    pub fn new(
        config: FloatChatConfig,
        orchestrator: ChatOrchestrator,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            auth,
            start_time: Instant::now(),
        }
    }
}
