//! FloatChat application binary - composition root.
//!
//! Ties together the FloatChat crates into a single executable:
//! 1. Load configuration from TOML (plus env overrides)
//! 2. Build the completion relay client for the hosted LLM endpoint
//! 3. Build the conversation orchestrator and the hosted-auth client
//! 4. Start the axum REST API server

use std::path::PathBuf;
use std::sync::Arc;

use floatchat_api::auth::HostedAuthClient;
use floatchat_api::{routes, AppState};
use floatchat_chat::{ChatOrchestrator, GroqClient};
use floatchat_core::FloatChatConfig;

/// Resolve the config file path (FLOATCHAT_CONFIG env, or
/// ~/.floatchat/config.toml).
fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var("FLOATCHAT_CONFIG") {
        return PathBuf::from(p);
    }
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".floatchat").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".floatchat").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting FloatChat v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = config_path();
    let mut config = FloatChatConfig::load_or_default(&config_file);
    config.apply_env_overrides();
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    if !config.llm.is_key_configured() {
        tracing::warn!(
            "No Groq API key configured - chat replies will carry setup instructions. \
             Set GROQ_API_KEY or [llm] api_key in the config file."
        );
    }

    // Completion relay.
    let completer = GroqClient::new(config.llm.clone())?
        .with_system_prompt(config.chat.system_prompt_enabled);
    tracing::info!(model = %config.llm.model, "Completion relay ready");

    // Conversation orchestrator.
    let orchestrator = ChatOrchestrator::new(Arc::new(completer))
        .with_max_message_length(config.chat.max_message_length);

    // Hosted identity provider.
    if config.auth.enabled && config.auth.project_url.trim().is_empty() {
        tracing::warn!("[auth] enabled without a project_url - sign-in will fail");
    }
    let auth = Arc::new(HostedAuthClient::new(config.auth.clone())?);

    // === API server ===

    let port = config.general.port;
    let addr = format!("127.0.0.1:{}", port);

    let state = AppState::new(config, orchestrator, auth);
    let router = routes::create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind - is another instance running?");
            tracing::error!("Try: FLOATCHAT_PORT={} cargo run -p floatchat-app", port + 1);
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "API server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
