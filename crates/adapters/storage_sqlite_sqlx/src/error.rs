//! Storage-specific error type wrapping sqlx errors.

use safetrack_domain::error::SafeTrackError;

/// Errors originating from the `SQLite` storage layer.
///
/// The `Display` text carries the underlying cause since it is what clients
/// receive in the body of a 500 response.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed, including pool acquire timeouts.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for SafeTrackError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
