//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod admin;
#[allow(clippy::missing_errors_doc)]
pub mod location;

use axum::Router;
use axum::routing::{get, post};

use safetrack_app::ports::DeviceRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<DR>() -> Router<AppState<DR>>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    Router::new()
        // Location
        .route("/location/update", post(location::update::<DR>))
        .route("/location/{device_id}", get(location::get::<DR>))
        // Admin
        .route("/admin/login", post(admin::login::<DR>))
        .route("/admin/devices", get(admin::devices::<DR>))
}
