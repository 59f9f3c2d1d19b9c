//! User API endpoints
//!
//! Users are never hard-deleted: DELETE soft-deletes and subsequent reads
//! return 404.

pub mod types;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, clamp_limit, default_limit};
use crate::data::PostgresService;
use crate::data::postgres::repositories::user as user_repo;

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use types::{CreateUserRequest, UpdateUserRequest, UserDto};

/// Shared state for Users API endpoints
#[derive(Clone)]
pub struct UsersApiState {
    pub database: Arc<PostgresService>,
}

/// Build Users API routes
pub fn routes(database: Arc<PostgresService>) -> Router<()> {
    let state = UsersApiState { database };

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(state)
}

/// Query parameters for listing users
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListUsersQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// List users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(("limit" = Option<u32>, Query, description = "Max rows to return")),
    responses(
        (status = 200, description = "Users, most recent first", body = [UserDto])
    )
)]
pub async fn list_users(
    State(state): State<UsersApiState>,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = user_repo::list_users(state.database.pool(), clamp_limit(query.limit))
        .await
        .map_err(ApiError::from_data)?;

    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Create a user account
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 409, description = "Account already exists for this provider")
    )
)]
pub async fn create_user(
    State(state): State<UsersApiState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let user = user_repo::create_user(
        state.database.pool(),
        &body.auth_provider,
        &body.provider_user_id,
        body.email.as_deref(),
        body.display_name.as_deref(),
        body.locale.as_deref(),
    )
    .await
    .map_err(|e| ApiError::from_data_with_conflict(e, "USER_EXISTS"))?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<UsersApiState>,
    Path(id): Path<i64>,
) -> Result<Json<UserDto>, ApiError> {
    let user = user_repo::get_user(state.database.pool(), id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| ApiError::not_found("USER_NOT_FOUND", format!("User not found: {}", id)))?;

    Ok(Json(UserDto::from(user)))
}

/// Update a user's profile
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<UsersApiState>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserDto>, ApiError> {
    let user = user_repo::update_user(
        state.database.pool(),
        id,
        body.display_name.as_deref(),
        body.email.as_deref(),
    )
    .await
    .map_err(ApiError::from_data)?
    .ok_or_else(|| ApiError::not_found("USER_NOT_FOUND", format!("User not found: {}", id)))?;

    Ok(Json(UserDto::from(user)))
}

/// Soft-delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<UsersApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = user_repo::soft_delete_user(state.database.pool(), id)
        .await
        .map_err(ApiError::from_data)?;

    if !deleted {
        return Err(ApiError::not_found(
            "USER_NOT_FOUND",
            format!("User not found: {}", id),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}
