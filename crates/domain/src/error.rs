//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SafeTrackError`] via `#[from]` so that `?` works at every boundary.

use std::error::Error as StdError;

/// Top-level error returned by every use-case and port.
#[derive(Debug, thiserror::Error)]
pub enum SafeTrackError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Unauthorized(#[from] UnauthorizedError),

    /// Any persistence failure. The message of the boxed error is the one
    /// reported to clients.
    #[error("{0}")]
    Storage(Box<dyn StdError + Send + Sync>),
}

/// A required input was absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields were missing. Field names use their wire
    /// spelling (`deviceId`, `latitude`, …).
    #[error("Missing required fields")]
    MissingFields(Vec<&'static str>),

    /// A device identifier was empty.
    #[error("device id must not be empty")]
    EmptyDeviceId,
}

/// No record exists for the requested key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A credential or authorization header did not match the configured secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UnauthorizedError {
    /// Login email/password pair did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The shared-secret header was absent or did not match.
    #[error("Unauthorized")]
    InvalidSecret,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_device_not_found() {
        let err: SafeTrackError = NotFoundError {
            entity: "Device",
            id: "d1".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Device not found");
    }

    #[test]
    fn should_display_missing_fields_without_listing_them() {
        let err = ValidationError::MissingFields(vec!["deviceId", "name"]);
        assert_eq!(err.to_string(), "Missing required fields");
    }

    #[test]
    fn should_display_storage_error_verbatim() {
        let source = std::io::Error::other("disk I/O error");
        let err = SafeTrackError::Storage(Box::new(source));
        assert_eq!(err.to_string(), "disk I/O error");
    }

    #[test]
    fn should_convert_unauthorized_into_top_level_error() {
        let err: SafeTrackError = UnauthorizedError::InvalidSecret.into();
        assert!(matches!(
            err,
            SafeTrackError::Unauthorized(UnauthorizedError::InvalidSecret)
        ));
        assert_eq!(err.to_string(), "Unauthorized");
    }
}
