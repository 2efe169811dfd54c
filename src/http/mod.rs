//! HTTP listener orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! RelayConfig
//!     → server.rs builds one router per listener:
//!         monitoring (/health, /ready, /version, /metrics)
//!         log-store forwarder   (port 3100)
//!         metrics-store forwarder (port 9090)
//!         generic remote forwarder (configured port)
//!     → all listeners bound up front (bind failure is fatal)
//!     → each served on its own task until shutdown
//! ```

pub mod server;

pub use server::{RelayServer, ServeError};
