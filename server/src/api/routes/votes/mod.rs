//! Vote API endpoints
//!
//! Casting requires exactly one author reference. Duplicates surface as 409
//! with code ALREADY_VOTED; a missing quote is 404 before the insert is
//! attempted.

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::types::ApiError;
use crate::data::PostgresService;
use crate::data::postgres::repositories::{quote as quote_repo, vote as vote_repo};
use crate::data::types::{Author, AuthorError};

use types::{CreateVoteRequest, VoteDto};

/// Shared state for Votes API endpoints
#[derive(Clone)]
pub struct VotesApiState {
    pub database: Arc<PostgresService>,
}

/// Build Votes API routes
pub fn routes(database: Arc<PostgresService>) -> Router<()> {
    let state = VotesApiState { database };

    Router::new().route("/", post(cast_vote)).with_state(state)
}

/// Cast a vote on a quote
#[utoipa::path(
    post,
    path = "/api/v1/votes",
    tag = "votes",
    request_body = CreateVoteRequest,
    responses(
        (status = 201, description = "Vote recorded", body = VoteDto),
        (status = 400, description = "Both or neither author reference supplied"),
        (status = 404, description = "Quote or referenced author not found"),
        (status = 409, description = "Already voted on this quote")
    )
)]
pub async fn cast_vote(
    State(state): State<VotesApiState>,
    ValidatedJson(body): ValidatedJson<CreateVoteRequest>,
) -> Result<(StatusCode, Json<VoteDto>), ApiError> {
    let author = Author::from_refs(body.user_id, body.device_id).map_err(|e| {
        let code = match e {
            AuthorError::BothProvided => "BOTH_AUTHORS",
            _ => "NO_AUTHOR",
        };
        ApiError::bad_request(code, e.to_string())
    })?;

    quote_repo::get_quote(state.database.pool(), body.quote_id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| {
            ApiError::not_found(
                "QUOTE_NOT_FOUND",
                format!("Quote not found: {}", body.quote_id),
            )
        })?;

    let vote = vote_repo::cast_vote(
        state.database.pool(),
        body.quote_id,
        &author,
        &body.vote_period,
    )
    .await
    .map_err(|e| ApiError::from_data_with_conflict(e, "ALREADY_VOTED"))?;

    Ok((StatusCode::CREATED, Json(VoteDto::from(vote))))
}
