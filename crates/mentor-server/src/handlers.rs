//! HTTP/WebSocket Handlers

use axum::{
    extract::{Path, Query, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::Response,
    Json,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};

use crypto_mentor::{
    Asset, ChartPoint, ChartRange, MarketSnapshot, MentorError, Recommendation, ResponseEnvelope,
    TechnicalIndicators,
};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub feed: String,
    pub feed_healthy: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    /// Named period (`1d`, `7d`, `30d`, `90d`)
    #[serde(default)]
    pub range: Option<String>,

    /// Explicit day count; takes precedence over `range`
    #[serde(default)]
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub asset: String,
    pub days: u32,
    pub points: Vec<ChartPoint>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

/// Map a mentor error to a status code and JSON body
pub fn error_response(err: &MentorError) -> ApiError {
    let (status, code) = match err {
        MentorError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        MentorError::InvalidRange(_) => (StatusCode::BAD_REQUEST, "INVALID_RANGE"),
        MentorError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "FEED_UNAVAILABLE"),
        MentorError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            code: code.into(),
        }),
    )
}

fn api<T>(result: crypto_mentor::Result<T>) -> ApiResult<T> {
    result.map(Json).map_err(|e| error_response(&e))
}

/// Day count for a chart query, falling back to the configured range
fn chart_days(query: &ChartQuery, default: ChartRange) -> crypto_mentor::Result<u32> {
    if let Some(days) = query.days {
        return Ok(days);
    }
    match query.range.as_deref() {
        Some(range) => Ok(range.parse::<ChartRange>()?.days()),
        None => Ok(default.days()),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        feed: state.mentor.feed_name().to_string(),
        feed_healthy: state.mentor.health_check().await,
    })
}

/// Main chat endpoint. Always answers with an envelope; failures are
/// reported inside it.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ResponseEnvelope> {
    Json(state.mentor.respond(&payload.message).await)
}

pub async fn list_assets(State(state): State<AppState>) -> Json<Vec<Asset>> {
    Json(state.mentor.list_assets().to_vec())
}

pub async fn list_prices(State(state): State<AppState>) -> ApiResult<Vec<MarketSnapshot>> {
    api(state.mentor.snapshots().await)
}

pub async fn asset_snapshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MarketSnapshot> {
    api(state.mentor.snapshot(&id).await)
}

pub async fn asset_chart(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<ChartResponse> {
    let days = chart_days(&query, state.mentor.config().chart_range).map_err(|e| error_response(&e))?;
    let points = state.mentor.series(&id, days).await.map_err(|e| error_response(&e))?;

    Ok(Json(ChartResponse {
        asset: id,
        days,
        points,
    }))
}

pub async fn asset_recommendation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Recommendation> {
    api(state.mentor.recommend(&id).await)
}

pub async fn asset_indicators(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TechnicalIndicators> {
    api(state.mentor.indicators(&id).await)
}

/// WebSocket price stream
pub async fn price_stream_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_stream(socket, state))
}

async fn handle_stream(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut ticker = tokio::time::interval(state.price_refresh);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let payload = match state.mentor.snapshots().await {
                    Ok(snapshots) => serde_json::json!({"type": "prices", "snapshots": snapshots}),
                    Err(e) => serde_json::json!({"type": "error", "error": e.user_message()}),
                };
                if sender.send(Message::Text(payload.to_string().into())).await.is_err() {
                    break;
                }
            }
            msg = receiver.next() => match msg {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!("Price stream closed");
}
