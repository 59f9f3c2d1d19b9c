//! Health check endpoint
//!
//! Reports liveness plus a storage probe so orchestrators can tell a hung
//! database apart from a dead process.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::PostgresService;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

#[derive(Clone)]
pub struct HealthApiState {
    pub database: Arc<PostgresService>,
}

pub fn routes(database: Arc<PostgresService>) -> Router<()> {
    Router::new()
        .route("/", get(health))
        .with_state(HealthApiState { database })
}

/// Health check with a storage probe
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<HealthApiState>) -> (StatusCode, Json<HealthResponse>) {
    let db_ok = sqlx::query("SELECT 1")
        .execute(state.database.pool())
        .await
        .is_ok();

    let (status_code, status, database) = if db_ok {
        (StatusCode::OK, "ok", "reachable")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
