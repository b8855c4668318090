//! Health check endpoints

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::app::AppState;
use crate::events::Topic;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub books: usize,
    pub authors: usize,
    pub listeners: usize,
}

/// Health check - always returns OK if the server is running
async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check - reports store sizes and active subscription listeners
async fn readyz(State(state): State<AppState>) -> Json<ReadyResponse> {
    let listeners = Topic::ALL
        .into_iter()
        .map(|t| state.hub.listener_count(t))
        .sum();

    Json(ReadyResponse {
        ready: true,
        books: state.db.books().read().len(),
        authors: state.db.authors().read().len(),
        listeners,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
