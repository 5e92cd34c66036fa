//! CITEKS HTTP Server
//!
//! Axum-based server for the agency site: the two checkout endpoints the
//! embedded payment page calls, plus the static WASM bundle.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use citeks_payments::{CheckoutProvider, StripeClient};

use crate::config::ServerConfig;
use crate::handlers::{create_checkout_session, health_check, session_status};
use crate::state::AppState;

/// Assemble routes; `static_dir` is `None` in tests
fn build_router(state: AppState, static_dir: Option<&str>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/health", get(health_check))
        // Payments
        .route("/api/create-checkout-session", post(create_checkout_session))
        .route("/api/session-status", get(session_status));

    // Static files (WASM frontend); hash routing means index.html serves every page
    let router = match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(format!("{dir}/index.html"))),
        ),
        None => router,
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Initialize payments
    let payments = match StripeClient::from_env() {
        Ok(client) => {
            tracing::info!("✓ Stripe configured");
            Some(Arc::new(client) as Arc<dyn CheckoutProvider>)
        }
        Err(e) => {
            tracing::warn!("⚠ Stripe not configured - payments disabled ({})", e);
            tracing::warn!("  Set STRIPE_SECRET_KEY in .env");
            None
        }
    };

    let app = build_router(AppState { payments }, Some(&config.static_dir));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🌲 CITEKS site running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                       - Health check");
    tracing::info!("  POST /api/create-checkout-session  - Embedded checkout session");
    tracing::info!("  GET  /api/session-status           - Purchase summary");
    tracing::info!("  GET  /*                            - Site bundle from {}", config.static_dir);

    axum::serve(listener, app).await?;

    Ok(())
}
