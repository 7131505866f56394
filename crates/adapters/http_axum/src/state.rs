//! Shared application state for axum handlers.

use std::sync::Arc;

use safetrack_app::ports::DeviceRepository;
use safetrack_app::services::admin_service::AdminService;
use safetrack_app::services::location_service::LocationService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need
/// to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<DR> {
    /// Location update and lookup.
    pub location_service: Arc<LocationService<DR>>,
    /// Admin login and device listing.
    pub admin_service: Arc<AdminService<DR>>,
}

impl<DR> Clone for AppState<DR> {
    fn clone(&self) -> Self {
        Self {
            location_service: Arc::clone(&self.location_service),
            admin_service: Arc::clone(&self.admin_service),
        }
    }
}

impl<DR> AppState<DR>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(location_service: LocationService<DR>, admin_service: AdminService<DR>) -> Self {
        Self {
            location_service: Arc::new(location_service),
            admin_service: Arc::new(admin_service),
        }
    }
}
