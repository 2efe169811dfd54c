//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     metrics.rs installs the Prometheus recorder
//!     → info gauge set once with the build version
//!
//! scrape:
//!     GET /metrics → scrape counter incremented,
//!                    uptime gauge recomputed,
//!                    registry rendered as text exposition
//! ```
//!
//! # Design Decisions
//! - Recorder only, no exporter listener: the monitoring router owns the
//!   endpoint so /metrics shares a port with /health and /ready
//! - Structured logging goes through `tracing`; the `DEBUG` env flag lowers
//!   the default filter to debug

pub mod metrics;
