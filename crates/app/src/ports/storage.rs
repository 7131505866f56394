//! Storage port — repository trait for device persistence.

use std::future::Future;

use safetrack_domain::device::Device;
use safetrack_domain::error::SafeTrackError;
use safetrack_domain::id::DeviceId;

/// Repository for persisting and querying [`Device`]s.
///
/// Implementations must guarantee at most one record per [`DeviceId`].
pub trait DeviceRepository {
    /// Insert `device`, or replace the name and last location of the record
    /// with the same id. Returns the record as stored after the write.
    ///
    /// Must be atomic per id: two concurrent upserts for the same device
    /// leave one of them intact, never a mix of both.
    fn upsert(&self, device: Device) -> impl Future<Output = Result<Device, SafeTrackError>> + Send;

    /// Exact-match lookup by id.
    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SafeTrackError>> + Send;

    /// Every stored device, in store-default order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Device>, SafeTrackError>> + Send;
}
