//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read variables, apply defaults)
//!     → loader.rs (validate mandatory fields)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - Mandatory Rancher credentials fail fast at startup
//! - Backend triples with any empty field are "unconfigured" and simply
//!   disable that backend rather than erroring

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::BackendTarget;
pub use schema::ProxyCredentials;
pub use schema::RelayConfig;
pub use schema::ServiceKind;
