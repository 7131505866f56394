//! JSON REST handlers for device locations.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use safetrack_app::ports::DeviceRepository;
use safetrack_domain::device::{Device, LocationReport};
use safetrack_domain::error::SafeTrackError;
use safetrack_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned after a successful update.
#[derive(Serialize)]
pub struct UpdatedBody {
    pub success: bool,
    pub device: Device,
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<UpdatedBody>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/location/update`
pub async fn update<DR>(
    State(state): State<AppState<DR>>,
    body: Result<Json<LocationReport>, JsonRejection>,
) -> Result<UpdateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let Json(report) = body?;
    let device = state.location_service.update_location(report).await?;
    Ok(UpdateResponse::Ok(Json(UpdatedBody {
        success: true,
        device,
    })))
}

/// `GET /api/location/{device_id}`
pub async fn get<DR>(
    State(state): State<AppState<DR>>,
    Path(device_id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = DeviceId::new(device_id).map_err(SafeTrackError::from)?;
    let device = state.location_service.get_location(&device_id).await?;
    Ok(GetResponse::Ok(Json(device)))
}
