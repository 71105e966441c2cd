//! REST endpoints for intake sessions and reference data.

pub mod error;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::intake::{Reply, SessionRegistry, SessionStatus};

pub use error::ApiError;

/// Shared state for the intake routes.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
}

/// Body of `POST /api/sessions/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// A reply tied to the session that produced it.
#[derive(Debug, Serialize)]
pub struct SessionReply {
    pub session_id: Uuid,
    pub reply: Reply,
}

#[derive(Debug, Serialize)]
struct ApplianceEntry<'a> {
    position: usize,
    name: &'a str,
    kwh_per_hour: f64,
}

#[derive(Debug, Serialize)]
struct PriceEntry {
    stratum: u8,
    price_per_kwh: f64,
}

/// Build the intake router.
pub fn intake_routes(registry: Arc<SessionRegistry>) -> Router {
    let state = AppState { registry };

    Router::new()
        .route("/health", get(health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_status))
        .route("/api/sessions/{id}/reset", post(reset_session))
        .route("/api/sessions/{id}/messages", post(post_message))
        .route("/api/appliances", get(list_appliances))
        .route("/api/prices", get(list_prices))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "energy-intake"
    }))
}

/// POST /api/sessions
///
/// Starts a conversation and returns the opening question.
async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let (session_id, reply) = state.registry.create().await;
    (StatusCode::CREATED, Json(SessionReply { session_id, reply }))
}

/// POST /api/sessions/{id}/reset
async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionReply>, ApiError> {
    let session_id = parse_id(&id)?;
    let reply = state.registry.reset(session_id).await?;
    Ok(Json(SessionReply { session_id, reply }))
}

/// POST /api/sessions/{id}/messages
///
/// Feeds one user utterance and returns the next prompt, a correction, or
/// the summary.
async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<Reply>, ApiError> {
    let session_id = parse_id(&id)?;
    let reply = state.registry.advance(session_id, &body.message).await?;
    Ok(Json(reply))
}

/// GET /api/sessions/{id}
async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatus>, ApiError> {
    let session_id = parse_id(&id)?;
    Ok(Json(state.registry.status(session_id).await?))
}

/// GET /api/appliances
///
/// The catalog in the order hours must be reported.
async fn list_appliances(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = &state.registry.settings().catalog;
    let entries: Vec<ApplianceEntry<'_>> = catalog
        .iter()
        .enumerate()
        .map(|(i, a)| ApplianceEntry {
            position: i + 1,
            name: &a.name,
            kwh_per_hour: a.kwh_per_hour,
        })
        .collect();
    Json(serde_json::json!({ "appliances": entries }))
}

/// GET /api/prices
async fn list_prices(State(state): State<AppState>) -> impl IntoResponse {
    let prices: Vec<PriceEntry> = state
        .registry
        .settings()
        .prices
        .iter()
        .map(|(stratum, price_per_kwh)| PriceEntry {
            stratum,
            price_per_kwh,
        })
        .collect();
    Json(serde_json::json!({ "prices": prices }))
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("invalid session id '{raw}'")))
}
