//! # safetrack-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** (`/api/location/…`, `/api/admin/…`) plus a
//!   status document at `/` and a plain-text `/health` probe
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into status codes and JSON bodies
//!
//! ## Dependency rule
//! Depends on `safetrack-app` (for port traits and services) and
//! `safetrack-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod home;
pub mod router;
pub mod state;
