//! # API Shared
//!
//! Shared utilities and definitions for the triage APIs.
//!
//! Contains:
//! - Wire types with OpenAPI schemas (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; other transports should reuse the same wire types.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
