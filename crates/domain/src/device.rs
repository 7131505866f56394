//! Device — a tracked thing and its last known position.
//!
//! A device is created the first time it reports a location and overwritten
//! on every later report. Only the latest fix is kept.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::id::DeviceId;
use crate::time::{Timestamp, now};

/// A single GPS fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: Timestamp,
}

/// A tracked device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: DeviceId,
    pub name: String,
    pub last_location: Location,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }
}

/// Step-by-step builder for [`Device`].
///
/// Every field except the timestamp is required; a missing timestamp
/// defaults to the current time.
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    device_id: Option<String>,
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timestamp: Option<Timestamp>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    #[must_use]
    pub fn longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] naming every field that is
    /// absent or an empty string. Zero is a valid coordinate.
    pub fn build(self) -> Result<Device, ValidationError> {
        let mut missing = Vec::new();

        let device_id = self
            .device_id
            .filter(|s| !s.is_empty())
            .map(DeviceId::new)
            .transpose()?;
        if device_id.is_none() {
            missing.push("deviceId");
        }
        let name = self.name.filter(|s| !s.is_empty());
        if name.is_none() {
            missing.push("name");
        }
        if self.latitude.is_none() {
            missing.push("latitude");
        }
        if self.longitude.is_none() {
            missing.push("longitude");
        }

        match (device_id, name, self.latitude, self.longitude) {
            (Some(device_id), Some(name), Some(latitude), Some(longitude)) => Ok(Device {
                device_id,
                name,
                last_location: Location {
                    latitude,
                    longitude,
                    timestamp: self.timestamp.unwrap_or_else(now),
                },
            }),
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}

/// A location report as received from a client, before validation.
///
/// Any field may be absent; [`LocationReport::into_device`] decides whether
/// the report is usable. Decoding never fails on a field's JSON type: a
/// coordinate may arrive as a number or a numeric string, an identifier as a
/// string or a number, and anything else (`null`, `false`, `""`, objects)
/// decodes as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationReport {
    #[serde(default, deserialize_with = "lenient_text")]
    pub device_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,
}

/// Any JSON value a client may put in a report field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawField::deserialize(deserializer)? {
        RawField::Number(value) => Some(value),
        RawField::Text(text) => text.trim().parse::<f64>().ok(),
        RawField::Other(_) => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawField::deserialize(deserializer)? {
        RawField::Text(text) => Some(text),
        RawField::Number(value) => Some(value.to_string()),
        RawField::Other(_) => None,
    })
}

impl LocationReport {
    /// Validate the report and stamp it with `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] when any of the four
    /// fields is absent or an empty string.
    pub fn into_device(self, timestamp: Timestamp) -> Result<Device, ValidationError> {
        let mut builder = Device::builder().timestamp(timestamp);
        if let Some(device_id) = self.device_id {
            builder = builder.device_id(device_id);
        }
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(latitude) = self.latitude {
            builder = builder.latitude(latitude);
        }
        if let Some(longitude) = self.longitude {
            builder = builder.longitude(longitude);
        }
        builder.build()
    }
}
