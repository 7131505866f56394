//! # safetrack-domain
//!
//! Pure domain model for the safetrack location-tracking backend.
//!
//! ## Responsibilities
//! - Foundational types: the client-chosen [`DeviceId`](id::DeviceId),
//!   error conventions, timestamps
//! - Define **Devices** and their single last known **Location**
//! - Validate incoming location reports (presence of every required field)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod device;
pub mod error;
pub mod id;
pub mod time;
