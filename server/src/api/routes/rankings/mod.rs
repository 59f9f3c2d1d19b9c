//! Ranking API endpoints
//!
//! Rankings are immutable per-period snapshots built from the votes cast in
//! that period. Finalization is idempotent: rows already present for the
//! period are kept, everything ends up marked finalized.

pub mod types;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::types::ApiError;
use crate::data::PostgresService;
use crate::data::postgres::repositories::ranking as ranking_repo;

use types::{RankingDto, is_valid_period};

/// Shared state for Rankings API endpoints
#[derive(Clone)]
pub struct RankingsApiState {
    pub database: Arc<PostgresService>,
}

/// Build Rankings API routes
pub fn routes(database: Arc<PostgresService>) -> Router<()> {
    let state = RankingsApiState { database };

    Router::new()
        .route("/{period}", get(get_rankings))
        .route("/{period}/finalize", post(finalize_rankings))
        .with_state(state)
}

fn check_period(period: &str) -> Result<(), ApiError> {
    if is_valid_period(period) {
        Ok(())
    } else {
        Err(ApiError::bad_request(
            "INVALID_PERIOD",
            "Period must be 1-32 characters",
        ))
    }
}

/// Get the ranking snapshot for a period
#[utoipa::path(
    get,
    path = "/api/v1/rankings/{period}",
    tag = "rankings",
    params(("period" = String, Path, description = "Vote period, e.g. 2026-08")),
    responses(
        (status = 200, description = "Snapshot rows, rank ascending", body = [RankingDto])
    )
)]
pub async fn get_rankings(
    State(state): State<RankingsApiState>,
    Path(period): Path<String>,
) -> Result<Json<Vec<RankingDto>>, ApiError> {
    check_period(&period)?;

    let rows = ranking_repo::list_rankings(state.database.pool(), &period)
        .await
        .map_err(ApiError::from_data)?;

    Ok(Json(rows.into_iter().map(RankingDto::from).collect()))
}

/// Build and finalize the snapshot for a period
#[utoipa::path(
    post,
    path = "/api/v1/rankings/{period}/finalize",
    tag = "rankings",
    params(("period" = String, Path, description = "Vote period, e.g. 2026-08")),
    responses(
        (status = 200, description = "Finalized snapshot, rank ascending", body = [RankingDto])
    )
)]
pub async fn finalize_rankings(
    State(state): State<RankingsApiState>,
    Path(period): Path<String>,
) -> Result<Json<Vec<RankingDto>>, ApiError> {
    check_period(&period)?;

    let rows = ranking_repo::finalize_period(state.database.pool(), &period)
        .await
        .map_err(ApiError::from_data)?;

    tracing::info!(period = %period, rows = rows.len(), "Rankings finalized");

    Ok(Json(rows.into_iter().map(RankingDto::from).collect()))
}
