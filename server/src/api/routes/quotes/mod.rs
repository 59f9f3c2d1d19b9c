//! Quote API endpoints
//!
//! Listings carry the `user_has_voted` annotation: when the caller supplies
//! an identity, the voted set is fetched with one batched query over the
//! listed quote ids; with no identity the annotation is all-false and no
//! vote query runs.

pub mod types;

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, clamp_limit};
use crate::data::PostgresService;
use crate::data::postgres::repositories::quote as quote_repo;
use crate::data::postgres::repositories::quote::NewQuote;
use crate::data::types::AuthorRefs;

use types::{
    CreateQuoteRequest, ListQuotesQuery, QuoteDto, UpdateQuoteRequest, annotate_voted,
};

/// Shared state for Quotes API endpoints
#[derive(Clone)]
pub struct QuotesApiState {
    pub database: Arc<PostgresService>,
}

/// Build Quotes API routes
pub fn routes(database: Arc<PostgresService>) -> Router<()> {
    let state = QuotesApiState { database };

    Router::new()
        .route("/", get(list_quotes).post(create_quote))
        .route(
            "/{id}",
            get(get_quote).put(update_quote).delete(delete_quote),
        )
        .with_state(state)
}

/// Submit a quote
#[utoipa::path(
    post,
    path = "/api/v1/quotes",
    tag = "quotes",
    request_body = CreateQuoteRequest,
    responses(
        (status = 201, description = "Quote created with status pending", body = QuoteDto),
        (status = 400, description = "Validation failed or no author reference"),
        (status = 404, description = "Referenced user or device does not exist")
    )
)]
pub async fn create_quote(
    State(state): State<QuotesApiState>,
    ValidatedJson(body): ValidatedJson<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<QuoteDto>), ApiError> {
    let new = NewQuote {
        author: AuthorRefs::new(body.user_id, body.device_id),
        child_name: body.child_name,
        child_age_years: body.child_age_years,
        child_age_months: body.child_age_months,
        quote: body.quote,
        context: body.context,
        language: body.language,
    };

    let quote = quote_repo::create_quote(state.database.pool(), &new)
        .await
        .map_err(ApiError::from_data)?;

    Ok((StatusCode::CREATED, Json(QuoteDto::from(quote))))
}

/// List quotes with the vote-status annotation
#[utoipa::path(
    get,
    path = "/api/v1/quotes",
    tag = "quotes",
    params(
        ("limit" = Option<u32>, Query, description = "Max rows to return"),
        ("sort_by" = Option<String>, Query, description = "Column to sort by (default created_at)"),
        ("order" = Option<String>, Query, description = "Sort direction, asc or desc (default desc)"),
        ("user_id" = Option<i64>, Query, description = "Requester user identity"),
        ("device_id" = Option<String>, Query, description = "Requester device identity")
    ),
    responses(
        (status = 200, description = "Quotes annotated with user_has_voted", body = [QuoteDto]),
        (status = 400, description = "Invalid sort column or both identities supplied")
    )
)]
pub async fn list_quotes(
    State(state): State<QuotesApiState>,
    ValidatedQuery(query): ValidatedQuery<ListQuotesQuery>,
) -> Result<Json<Vec<QuoteDto>>, ApiError> {
    let requester = query.requester()?;
    let order = query.order_by()?;

    let rows = quote_repo::list_quotes(
        state.database.pool(),
        clamp_limit(query.limit),
        &order.column,
        order.is_descending(),
    )
    .await
    .map_err(ApiError::from_data)?;

    let voted = match &requester {
        Some(author) => {
            let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
            quote_repo::check_voted(state.database.pool(), author, &ids)
                .await
                .map_err(ApiError::from_data)?
        }
        None => HashSet::new(),
    };

    Ok(Json(annotate_voted(rows, &voted)))
}

/// Get a quote by ID
#[utoipa::path(
    get,
    path = "/api/v1/quotes/{id}",
    tag = "quotes",
    params(("id" = i64, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote", body = QuoteDto),
        (status = 404, description = "Quote not found")
    )
)]
pub async fn get_quote(
    State(state): State<QuotesApiState>,
    Path(id): Path<i64>,
) -> Result<Json<QuoteDto>, ApiError> {
    let quote = quote_repo::get_quote(state.database.pool(), id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| {
            ApiError::not_found("QUOTE_NOT_FOUND", format!("Quote not found: {}", id))
        })?;

    Ok(Json(QuoteDto::from(quote)))
}

/// Edit a quote's text or context
#[utoipa::path(
    put,
    path = "/api/v1/quotes/{id}",
    tag = "quotes",
    params(("id" = i64, Path, description = "Quote ID")),
    request_body = UpdateQuoteRequest,
    responses(
        (status = 200, description = "Quote updated", body = QuoteDto),
        (status = 404, description = "Quote not found")
    )
)]
pub async fn update_quote(
    State(state): State<QuotesApiState>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<UpdateQuoteRequest>,
) -> Result<Json<QuoteDto>, ApiError> {
    let quote = quote_repo::update_quote(
        state.database.pool(),
        id,
        body.quote.as_deref(),
        body.context.as_deref(),
    )
    .await
    .map_err(ApiError::from_data)?
    .ok_or_else(|| ApiError::not_found("QUOTE_NOT_FOUND", format!("Quote not found: {}", id)))?;

    Ok(Json(QuoteDto::from(quote)))
}

/// Soft-delete a quote
#[utoipa::path(
    delete,
    path = "/api/v1/quotes/{id}",
    tag = "quotes",
    params(("id" = i64, Path, description = "Quote ID")),
    responses(
        (status = 204, description = "Quote deleted"),
        (status = 404, description = "Quote not found")
    )
)]
pub async fn delete_quote(
    State(state): State<QuotesApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = quote_repo::soft_delete_quote(state.database.pool(), id)
        .await
        .map_err(ApiError::from_data)?;

    if !deleted {
        return Err(ApiError::not_found(
            "QUOTE_NOT_FOUND",
            format!("Quote not found: {}", id),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}
