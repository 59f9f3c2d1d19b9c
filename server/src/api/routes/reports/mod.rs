//! Report API endpoints
//!
//! Reports use the weak authorship rule (at least one reference, both
//! tolerated) and are unique per (quote, actor).

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::types::ApiError;
use crate::data::PostgresService;
use crate::data::postgres::repositories::{quote as quote_repo, report as report_repo};
use crate::data::types::AuthorRefs;

use types::{CreateReportRequest, ReportDto};

/// Shared state for Reports API endpoints
#[derive(Clone)]
pub struct ReportsApiState {
    pub database: Arc<PostgresService>,
}

/// Build Reports API routes
pub fn routes(database: Arc<PostgresService>) -> Router<()> {
    let state = ReportsApiState { database };

    Router::new()
        .route("/", post(create_report))
        .with_state(state)
}

/// File a report against a quote
#[utoipa::path(
    post,
    path = "/api/v1/reports",
    tag = "reports",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report filed", body = ReportDto),
        (status = 400, description = "No author reference supplied"),
        (status = 404, description = "Quote not found"),
        (status = 409, description = "Already reported this quote")
    )
)]
pub async fn create_report(
    State(state): State<ReportsApiState>,
    ValidatedJson(body): ValidatedJson<CreateReportRequest>,
) -> Result<(StatusCode, Json<ReportDto>), ApiError> {
    let author = AuthorRefs::new(body.user_id, body.device_id);
    author
        .validate()
        .map_err(|e| ApiError::bad_request("NO_AUTHOR", e.to_string()))?;

    quote_repo::get_quote(state.database.pool(), body.quote_id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| {
            ApiError::not_found(
                "QUOTE_NOT_FOUND",
                format!("Quote not found: {}", body.quote_id),
            )
        })?;

    let report = report_repo::create_report(
        state.database.pool(),
        body.quote_id,
        &author,
        &body.reason,
        body.details.as_deref(),
    )
    .await
    .map_err(|e| ApiError::from_data_with_conflict(e, "ALREADY_REPORTED"))?;

    Ok((StatusCode::CREATED, Json(ReportDto::from(report))))
}
