//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use safetrack_domain::error::SafeTrackError;

/// JSON error body returned by API endpoints.
///
/// Authorization failures use a `message` key, everything else `error`.
#[derive(Serialize)]
#[serde(untagged)]
enum ErrorBody {
    Error { error: String },
    Message { message: String },
}

/// Maps [`SafeTrackError`] and request-decoding failures to an HTTP response
/// with the appropriate status code.
pub enum ApiError {
    Domain(SafeTrackError),
    /// The request body was not the JSON the endpoint expects.
    MalformedBody(JsonRejection),
}

impl From<SafeTrackError> for ApiError {
    fn from(err: SafeTrackError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Domain(SafeTrackError::Validation(err)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::Error {
                    error: err.to_string(),
                },
            ),
            Self::Domain(SafeTrackError::NotFound(err)) => (
                StatusCode::NOT_FOUND,
                ErrorBody::Error {
                    error: err.to_string(),
                },
            ),
            Self::Domain(SafeTrackError::Unauthorized(err)) => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::Message {
                    message: err.to_string(),
                },
            ),
            // The cause is returned to the client as-is.
            Self::Domain(SafeTrackError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::Error {
                        error: err.to_string(),
                    },
                )
            }
            Self::MalformedBody(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody::Error {
                        error: rejection.body_text(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
