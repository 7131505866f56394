//! Admin service — shared-secret gate in front of the unrestricted device
//! listing.
//!
//! There are no sessions or tokens: `login` only reports whether a pair of
//! credentials matches, and every privileged call presents the password
//! again.

use std::fmt;

use safetrack_domain::device::Device;
use safetrack_domain::error::{SafeTrackError, UnauthorizedError};

use crate::ports::DeviceRepository;

/// Administrator email and password configured at process start.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application service for administrator operations.
///
/// Built without credentials, every check fails.
pub struct AdminService<R> {
    repo: R,
    credentials: Option<AdminCredentials>,
}

impl<R: DeviceRepository> AdminService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R, credentials: Option<AdminCredentials>) -> Self {
        Self { repo, credentials }
    }

    /// Check an email/password pair against the configured administrator.
    ///
    /// Both values must match exactly, including case.
    #[tracing::instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> bool {
        let granted = self
            .credentials
            .as_ref()
            .is_some_and(|creds| creds.email == email && creds.password == password);
        if !granted {
            tracing::warn!("rejected admin login");
        }
        granted
    }

    /// Return every stored device, provided `secret` equals the configured
    /// administrator password.
    ///
    /// # Errors
    ///
    /// Returns [`SafeTrackError::Unauthorized`] when the secret is absent or
    /// wrong, or a storage error propagated from the repository.
    #[tracing::instrument(skip_all)]
    pub async fn list_all_devices(&self, secret: Option<&str>) -> Result<Vec<Device>, SafeTrackError> {
        let authorized = match (&self.credentials, secret) {
            (Some(creds), Some(secret)) => creds.password == secret,
            _ => false,
        };
        if !authorized {
            tracing::warn!("rejected admin device listing");
            return Err(UnauthorizedError::InvalidSecret.into());
        }
        self.repo.find_all().await
    }
}
