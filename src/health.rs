//! `GET /health` endpoint handler.
//!
//! Answered locally without contacting any downstream, always available.
//! The body is a fixed contract — `{"status": "ok"}` — that load
//! balancers and orchestrators probe, so nothing else goes in it.

use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
