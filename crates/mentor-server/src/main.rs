//! crypto-mentor HTTP Server
//!
//! Axum-based server exposing the chat assistant and the simulated market
//! over REST, plus a WebSocket price stream.

mod handlers;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crypto_mentor::{Mentor, MentorConfig};

use crate::handlers::{
    asset_chart, asset_indicators, asset_recommendation, asset_snapshot, chat_handler,
    health_check, list_assets, list_prices, price_stream_handler,
};
use crate::state::AppState;

const DEFAULT_PRICE_REFRESH_SECS: u64 = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = MentorConfig::from_env();
    if let Some(seed) = config.seed {
        tracing::info!("Seeded randomness: {}", seed);
    }

    let mentor = Arc::new(Mentor::from_config(config));
    tracing::info!(
        "✓ {} ready with {} assets",
        mentor.feed_name(),
        mentor.list_assets().len()
    );

    let price_refresh = std::env::var("MENTOR_PRICE_REFRESH_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map_or(Duration::from_secs(DEFAULT_PRICE_REFRESH_SECS), Duration::from_secs);

    let state = AppState {
        mentor,
        price_refresh,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))

        // Chat
        .route("/api/chat", post(chat_handler))

        // Market
        .route("/api/assets", get(list_assets))
        .route("/api/prices", get(list_prices))
        .route("/api/prices/stream", get(price_stream_handler))
        .route("/api/assets/{id}/snapshot", get(asset_snapshot))
        .route("/api/assets/{id}/chart", get(asset_chart))
        .route("/api/assets/{id}/recommendation", get(asset_recommendation))
        .route("/api/assets/{id}/indicators", get(asset_indicators))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 crypto-mentor server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                          - Health check");
    tracing::info!("  POST /api/chat                        - Send message");
    tracing::info!("  GET  /api/assets                      - List assets");
    tracing::info!("  GET  /api/prices                      - All prices");
    tracing::info!("  GET  /api/prices/stream               - WebSocket price stream");
    tracing::info!("  GET  /api/assets/{{id}}/snapshot        - Asset price");
    tracing::info!("  GET  /api/assets/{{id}}/chart           - Price history");
    tracing::info!("  GET  /api/assets/{{id}}/recommendation  - Trading recommendation");
    tracing::info!("  GET  /api/assets/{{id}}/indicators      - Technical indicators");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
