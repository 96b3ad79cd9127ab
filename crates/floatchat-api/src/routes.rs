//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression, and all
//! endpoint handlers. Chat and session routes go behind the hosted-auth
//! middleware when `[auth].enabled` is set.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS middleware: allow localhost origins for dashboard access.
    // Use the configured port plus port+1 for a dev server.
    let port = state.config.general.port;
    let dev_port = port.saturating_add(1);
    let origins: Vec<HeaderValue> = [
        format!("http://127.0.0.1:{}", port),
        format!("http://localhost:{}", port),
        format!("http://127.0.0.1:{}", dev_port),
        format!("http://localhost:{}", dev_port),
    ]
    .iter()
    .filter_map(|o| o.parse().ok())
    .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Routes that never require authentication.
    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/signup", post(handlers::sign_up))
        .route("/auth/signin", post(handlers::sign_in));

    // Routes gated on user presence when auth is enabled.
    let session_routes = Router::new()
        .route("/chat", post(handlers::chat))
        .route(
            "/chat/history",
            get(handlers::chat_history).delete(handlers::clear_history),
        )
        .route("/chat/visualization", get(handlers::current_visualization))
        .route("/auth/signout", post(handlers::sign_out))
        .route("/auth/user", get(handlers::current_user));

    let session_routes = if state.config.auth.enabled {
        session_routes.route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_user,
        ))
    } else {
        session_routes
    };

    public_routes
        .merge(session_routes)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Tests
// =============================================================================
