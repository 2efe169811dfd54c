//! Liveness, readiness, and version reporting.
//!
//! # Data Flow
//! ```text
//! GET /health → one authenticated GET against the Rancher endpoint
//! GET /ready  → fresh probe of every configured backend (no caching)
//! GET /version → static build information as JSON
//! ```
//!
//! # Design Decisions
//! - Liveness is "can we still reach Rancher", readiness is "can Rancher
//!   still reach every configured backend" — kept strictly separate
//! - Readiness is recomputed on every request; one unhealthy configured
//!   backend flips the aggregate to failure
//! - The same management-API check is fatal at startup and non-fatal here

pub mod handlers;

pub use handlers::{check_management_api, LivenessError, MonitorState};
