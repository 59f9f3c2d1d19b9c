//! Device API endpoints
//!
//! Devices are anonymous clients identified by an opaque client-generated id.
//! Linking attaches a device to a user account after sign-in.

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::extractors::{DevicePath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::PostgresService;
use crate::data::postgres::repositories::{device as device_repo, user as user_repo};

use types::{CreateDeviceRequest, DeviceDto, LinkDeviceRequest};

/// Shared state for Devices API endpoints
#[derive(Clone)]
pub struct DevicesApiState {
    pub database: Arc<PostgresService>,
}

/// Build Devices API routes
pub fn routes(database: Arc<PostgresService>) -> Router<()> {
    let state = DevicesApiState { database };

    Router::new()
        .route("/", post(register_device))
        .route("/{device_id}", get(get_device))
        .route("/{device_id}/link", put(link_device))
        .with_state(state)
}

/// Register a device
#[utoipa::path(
    post,
    path = "/api/v1/devices",
    tag = "devices",
    request_body = CreateDeviceRequest,
    responses(
        (status = 201, description = "Device registered", body = DeviceDto),
        (status = 409, description = "Fingerprint already registered")
    )
)]
pub async fn register_device(
    State(state): State<DevicesApiState>,
    ValidatedJson(body): ValidatedJson<CreateDeviceRequest>,
) -> Result<(StatusCode, Json<DeviceDto>), ApiError> {
    let device = device_repo::register_device(
        state.database.pool(),
        &body.device_id,
        &body.device_fingerprint,
        body.locale.as_deref(),
        body.platform.as_deref(),
        body.app_version.as_deref(),
    )
    .await
    .map_err(|e| ApiError::from_data_with_conflict(e, "DEVICE_EXISTS"))?;

    Ok((StatusCode::CREATED, Json(DeviceDto::from(device))))
}

/// Get a device by ID
#[utoipa::path(
    get,
    path = "/api/v1/devices/{device_id}",
    tag = "devices",
    params(("device_id" = String, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device", body = DeviceDto),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_device(
    State(state): State<DevicesApiState>,
    path: DevicePath,
) -> Result<Json<DeviceDto>, ApiError> {
    let device = device_repo::get_device(state.database.pool(), &path.device_id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| {
            ApiError::not_found(
                "DEVICE_NOT_FOUND",
                format!("Device not found: {}", path.device_id),
            )
        })?;

    Ok(Json(DeviceDto::from(device)))
}

/// Link a device to a user account
#[utoipa::path(
    put,
    path = "/api/v1/devices/{device_id}/link",
    tag = "devices",
    params(("device_id" = String, Path, description = "Device ID")),
    request_body = LinkDeviceRequest,
    responses(
        (status = 200, description = "Device linked", body = DeviceDto),
        (status = 404, description = "Device or user not found")
    )
)]
pub async fn link_device(
    State(state): State<DevicesApiState>,
    path: DevicePath,
    ValidatedJson(body): ValidatedJson<LinkDeviceRequest>,
) -> Result<Json<DeviceDto>, ApiError> {
    // The target user must exist and not be soft-deleted
    user_repo::get_user(state.database.pool(), body.user_id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| {
            ApiError::not_found(
                "USER_NOT_FOUND",
                format!("User not found: {}", body.user_id),
            )
        })?;

    let device = device_repo::link_device(state.database.pool(), &path.device_id, body.user_id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| {
            ApiError::not_found(
                "DEVICE_NOT_FOUND",
                format!("Device not found: {}", path.device_id),
            )
        })?;

    Ok(Json(DeviceDto::from(device)))
}
