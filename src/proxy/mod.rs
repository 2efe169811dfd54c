//! Service-proxy relay subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request on a forwarding listener
//!     → forward.rs (rewrite target URL, copy headers, inject basic auth)
//!     → Rancher service-proxy endpoint (url.rs builds the base URL)
//!     → response streamed back to the caller unmodified
//!
//! readiness request
//!     → probe.rs (authenticated GET on the backend's ready path)
//!     → aggregate pass/fail over configured backends
//! ```
//!
//! # Design Decisions
//! - No retries, no buffering: the relay is a fail-fast pass-through
//! - The caller's own credentials are irrelevant; only the relay's
//!   Rancher credentials cross the authentication boundary
//! - Probe paths are keyed by a closed ServiceKind enum, not label strings

pub mod forward;
pub mod probe;
pub mod url;

pub use forward::forwarder;
pub use probe::{probe, ProbeError};
pub use url::build_service_proxy_url;
