//! Location service — use-cases for recording and reading device positions.

use safetrack_domain::device::{Device, LocationReport};
use safetrack_domain::error::{NotFoundError, SafeTrackError};
use safetrack_domain::id::DeviceId;
use safetrack_domain::time::now;

use crate::ports::DeviceRepository;

/// Application service for location updates and lookups.
pub struct LocationService<R> {
    repo: R,
}

impl<R: DeviceRepository> LocationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Record a device's current position, creating the device on its first
    /// report.
    ///
    /// The fix is stamped with the server's current time; any client-side
    /// time is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SafeTrackError::Validation`] if any required field is
    /// missing (the store is not touched), or a storage error propagated
    /// from the repository.
    #[tracing::instrument(skip(self, report), fields(device_id = report.device_id.as_deref()))]
    pub async fn update_location(&self, report: LocationReport) -> Result<Device, SafeTrackError> {
        let device = report
            .into_device(now())
            .inspect_err(|err| tracing::debug!(?err, "rejected location report"))?;
        self.repo.upsert(device).await
    }

    /// Return the device with `id` and its last known position.
    ///
    /// # Errors
    ///
    /// Returns [`SafeTrackError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self, id), fields(device_id = %id))]
    pub async fn get_location(&self, id: &DeviceId) -> Result<Device, SafeTrackError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use safetrack_domain::error::ValidationError;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    /// Shared in-memory repository; clones see the same records.
    #[derive(Clone, Default)]
    pub(crate) struct InMemoryDeviceRepo {
        store: Arc<Mutex<HashMap<DeviceId, Device>>>,
    }

    impl InMemoryDeviceRepo {
        pub(crate) fn len(&self) -> usize {
            self.store.lock().unwrap().len()
        }
    }

    impl DeviceRepository for InMemoryDeviceRepo {
        fn upsert(
            &self,
            device: Device,
        ) -> impl Future<Output = Result<Device, SafeTrackError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(device.device_id.clone(), device.clone());
            async move { Ok(device) }
        }

        fn find_by_id(
            &self,
            id: &DeviceId,
        ) -> impl Future<Output = Result<Option<Device>, SafeTrackError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(id).cloned();
            async move { Ok(result) }
        }

        fn find_all(&self) -> impl Future<Output = Result<Vec<Device>, SafeTrackError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Device> = store.values().cloned().collect();
            async move { Ok(result) }
        }
    }

    /// Repository whose every call fails as if the database were down.
    pub(crate) struct UnavailableRepo;

    impl DeviceRepository for UnavailableRepo {
        async fn upsert(&self, _device: Device) -> Result<Device, SafeTrackError> {
            Err(SafeTrackError::Storage("connection refused".into()))
        }
        async fn find_by_id(&self, _id: &DeviceId) -> Result<Option<Device>, SafeTrackError> {
            Err(SafeTrackError::Storage("connection refused".into()))
        }
        async fn find_all(&self) -> Result<Vec<Device>, SafeTrackError> {
            Err(SafeTrackError::Storage("connection refused".into()))
        }
    }

    fn report(device_id: &str, name: &str, latitude: f64, longitude: f64) -> LocationReport {
        LocationReport {
            device_id: Some(device_id.to_string()),
            name: Some(name.to_string()),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    fn id(value: &str) -> DeviceId {
        DeviceId::new(value).unwrap()
    }

    #[tokio::test]
    async fn should_return_stored_location_after_update() {
        let svc = LocationService::new(InMemoryDeviceRepo::default());
        let before = now();

        let updated = svc
            .update_location(report("d1", "Phone", 37.7, -122.4))
            .await
            .unwrap();
        assert_eq!(updated.device_id, id("d1"));

        let fetched = svc.get_location(&id("d1")).await.unwrap();
        assert_eq!(fetched.name, "Phone");
        assert!((fetched.last_location.latitude - 37.7).abs() < f64::EPSILON);
        assert!((fetched.last_location.longitude + 122.4).abs() < f64::EPSILON);
        assert!(fetched.last_location.timestamp >= before);
    }

    #[tokio::test]
    async fn should_keep_single_record_reflecting_latest_update() {
        let repo = InMemoryDeviceRepo::default();
        let svc = LocationService::new(repo.clone());

        svc.update_location(report("d1", "Phone", 37.7, -122.4))
            .await
            .unwrap();
        svc.update_location(report("d1", "Tablet", 48.85, 2.35))
            .await
            .unwrap();

        assert_eq!(repo.len(), 1);
        let fetched = svc.get_location(&id("d1")).await.unwrap();
        assert_eq!(fetched.name, "Tablet");
        assert!((fetched.last_location.latitude - 48.85).abs() < f64::EPSILON);
        assert!((fetched.last_location.longitude - 2.35).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn should_return_not_found_when_device_unknown() {
        let svc = LocationService::new(InMemoryDeviceRepo::default());
        let result = svc.get_location(&id("unknown")).await;
        assert!(matches!(result, Err(SafeTrackError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_update_without_touching_store_when_field_missing() {
        let repo = InMemoryDeviceRepo::default();
        let svc = LocationService::new(repo.clone());

        let mut incomplete = report("d1", "Phone", 37.7, -122.4);
        incomplete.name = None;
        let result = svc.update_location(incomplete).await;

        assert!(matches!(
            result,
            Err(SafeTrackError::Validation(ValidationError::MissingFields(ref fields)))
                if fields == &["name"]
        ));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn should_reject_update_when_device_id_empty() {
        let svc = LocationService::new(InMemoryDeviceRepo::default());
        let result = svc.update_location(report("", "Phone", 1.0, 1.0)).await;
        assert!(matches!(result, Err(SafeTrackError::Validation(_))));
    }

    #[tokio::test]
    async fn should_accept_zero_coordinates() {
        let svc = LocationService::new(InMemoryDeviceRepo::default());
        let device = svc
            .update_location(report("buoy", "Null Island", 0.0, 0.0))
            .await
            .unwrap();
        assert!(device.last_location.latitude.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn should_propagate_storage_error_on_update() {
        let svc = LocationService::new(UnavailableRepo);
        let result = svc.update_location(report("d1", "Phone", 1.0, 2.0)).await;
        assert!(matches!(result, Err(SafeTrackError::Storage(_))));
    }

    #[tokio::test]
    async fn should_propagate_storage_error_on_lookup() {
        let svc = LocationService::new(UnavailableRepo);
        let result = svc.get_location(&id("d1")).await;
        let err = result.unwrap_err();
        assert!(matches!(err, SafeTrackError::Storage(_)));
        assert_eq!(err.to_string(), "connection refused");
    }
}
