//! JSON REST handlers for administrator access.
//!
//! `login` only answers yes or no. The device listing checks the raw
//! `Authorization` header value against the admin password on every call;
//! there is no bearer scheme and no token.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use safetrack_app::ports::DeviceRepository;
use safetrack_domain::device::Device;
use safetrack_domain::error::UnauthorizedError;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the login endpoint.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of a login answer.
#[derive(Serialize)]
pub struct LoginBody {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Possible responses from the login endpoint.
pub enum LoginResponse {
    Ok,
    InvalidCredentials,
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => Json(LoginBody {
                success: true,
                message: None,
            })
            .into_response(),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(LoginBody {
                    success: false,
                    message: Some(UnauthorizedError::InvalidCredentials.to_string()),
                }),
            )
                .into_response(),
        }
    }
}

/// Possible responses from the device listing endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/admin/login`
///
/// A body that cannot be read as JSON is answered like wrong credentials.
pub async fn login<DR>(
    State(state): State<AppState<DR>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> LoginResponse
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected login body");
            return LoginResponse::InvalidCredentials;
        }
    };
    let granted = match (req.email, req.password) {
        (Some(email), Some(password)) => state.admin_service.login(&email, &password),
        _ => false,
    };
    if granted {
        LoginResponse::Ok
    } else {
        LoginResponse::InvalidCredentials
    }
}

/// `GET /api/admin/devices`
pub async fn devices<DR>(
    State(state): State<AppState<DR>>,
    headers: HeaderMap,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let secret = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let devices = state.admin_service.list_all_devices(secret).await?;
    Ok(ListResponse::Ok(Json(devices)))
}
