//! Process lifecycle management.
//!
//! # Design Decisions
//! - Every listener subscribes to one broadcast shutdown signal
//! - Listeners stop within bounded time of the signal (graceful shutdown)

pub mod shutdown;

pub use shutdown::Shutdown;
