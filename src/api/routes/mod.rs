//! Route handlers.

pub mod applications;
pub mod gamemodes;
pub mod players;
pub mod rankings;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub source: &'static str,
    pub version: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        source: state.source.name(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
