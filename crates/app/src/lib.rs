//! # safetrack-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters must implement:
//!   - `DeviceRepository` — atomic upsert, lookup by id, full scan
//! - Define **driving/inbound ports** as use-case structs:
//!   - `LocationService` — record and read a device's last position
//!   - `AdminService` — credential check and unrestricted device listing
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `safetrack-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
