//! `GET /` — liveness document listing the public endpoints.

use axum::Json;
use serde::Serialize;

/// Body of the root document.
#[derive(Serialize)]
pub struct Status {
    pub message: &'static str,
    pub status: &'static str,
    pub endpoints: Endpoints,
}

/// Public endpoints, keyed by `"METHOD path"`.
#[derive(Serialize)]
pub struct Endpoints {
    #[serde(rename = "POST /api/location/update")]
    pub update_location: &'static str,
    #[serde(rename = "GET /api/location/:deviceId")]
    pub get_location: &'static str,
}

/// `GET /`
pub async fn index() -> Json<Status> {
    Json(Status {
        message: "SafeTrack GPS API is running!",
        status: "active",
        endpoints: Endpoints {
            update_location: "Update device location",
            get_location: "Get device location",
        },
    })
}
