//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use safetrack_app::ports::DeviceRepository;
use safetrack_domain::device::{Device, Location};
use safetrack_domain::error::SafeTrackError;
use safetrack_domain::id::DeviceId;
use safetrack_domain::time;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let device_id: String = row.try_get("device_id")?;
        let name: String = row.try_get("name")?;
        let latitude: f64 = row.try_get("latitude")?;
        let longitude: f64 = row.try_get("longitude")?;
        let timestamp: String = row.try_get("location_timestamp")?;

        let device_id =
            DeviceId::new(device_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let timestamp =
            time::parse_rfc3339(&timestamp).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Device {
            device_id,
            name,
            last_location: Location {
                latitude,
                longitude,
                timestamp,
            },
        }))
    }
}

/// Single statement so that concurrent writers to one device never produce
/// a row mixing fields from both.
const UPSERT: &str = r"
    INSERT INTO devices (device_id, name, latitude, longitude, location_timestamp)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT (device_id) DO UPDATE SET
        name = excluded.name,
        latitude = excluded.latitude,
        longitude = excluded.longitude,
        location_timestamp = excluded.location_timestamp
    RETURNING *
";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE device_id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices";

/// `SQLite`-backed device repository.
#[derive(Clone)]
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn upsert(&self, device: Device) -> impl Future<Output = Result<Device, SafeTrackError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(UPSERT)
                .bind(device.device_id.as_str())
                .bind(&device.name)
                .bind(device.last_location.latitude)
                .bind(device.last_location.longitude)
                .bind(time::to_rfc3339(&device.last_location.timestamp))
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn find_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SafeTrackError>> + Send {
        let pool = self.pool.clone();
        let id = id.as_str().to_owned();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Device>, SafeTrackError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteDeviceRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
            ..Config::default()
        }
        .build()
        .await
        .unwrap();
        SqliteDeviceRepository::new(db.pool().clone())
    }

    fn device(id: &str, name: &str, latitude: f64, longitude: f64) -> Device {
        Device::builder()
            .device_id(id)
            .name(name)
            .latitude(latitude)
            .longitude(longitude)
            .timestamp(time::now())
            .build()
            .unwrap()
    }

    fn id(value: &str) -> DeviceId {
        DeviceId::new(value).unwrap()
    }

    #[tokio::test]
    async fn should_insert_and_retrieve_device_when_absent() {
        let repo = setup().await;
        let written = device("d1", "Phone", 37.7, -122.4);

        let stored = repo.upsert(written.clone()).await.unwrap();
        assert_eq!(stored, written);

        let fetched = repo.find_by_id(&id("d1")).await.unwrap().unwrap();
        assert_eq!(fetched, written);
    }

    #[tokio::test]
    async fn should_overwrite_name_and_location_when_present() {
        let repo = setup().await;
        repo.upsert(device("d1", "Phone", 37.7, -122.4))
            .await
            .unwrap();

        let second = device("d1", "Tablet", 48.85, 2.35);
        let stored = repo.upsert(second.clone()).await.unwrap();
        assert_eq!(stored, second);

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![second]);
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let repo = setup().await;
        let result = repo.find_by_id(&id("unknown")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_match_id_exactly() {
        let repo = setup().await;
        repo.upsert(device("Phone-1", "Phone", 1.0, 2.0))
            .await
            .unwrap();

        assert!(repo.find_by_id(&id("phone-1")).await.unwrap().is_none());
        assert!(repo.find_by_id(&id("Phone")).await.unwrap().is_none());
        assert!(repo.find_by_id(&id("Phone-1")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn should_list_all_devices() {
        let repo = setup().await;
        repo.upsert(device("d1", "Phone", 1.0, 2.0)).await.unwrap();
        repo.upsert(device("d2", "Watch", 3.0, 4.0)).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_keep_one_whole_record_under_concurrent_upserts() {
        let repo = setup().await;
        let a = device("d1", "A", 10.0, 10.0);
        let b = device("d1", "B", 20.0, 20.0);

        let (ra, rb) = tokio::join!(repo.upsert(a.clone()), repo.upsert(b.clone()));
        ra.unwrap();
        rb.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0] == a || all[0] == b, "mixed record: {:?}", all[0]);
    }

    #[tokio::test]
    async fn should_store_zero_coordinates() {
        let repo = setup().await;
        repo.upsert(device("buoy", "Null Island", 0.0, 0.0))
            .await
            .unwrap();

        let fetched = repo.find_by_id(&id("buoy")).await.unwrap().unwrap();
        assert!(fetched.last_location.latitude.abs() < f64::EPSILON);
        assert!(fetched.last_location.longitude.abs() < f64::EPSILON);
    }
}
