//! Rancher Service-Proxy Relay
//!
//! A sidecar that exposes plain, locally-bound HTTP listeners and relays
//! their traffic to observability services (Loki, Prometheus, or any named
//! service) that are only reachable through Rancher's authenticated
//! service-proxy endpoint.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 RELAY                        │
//!                         │                                              │
//!   Local caller          │  ┌──────────┐   ┌───────────┐               │
//!   ──────────────────────┼─▶│ listener │──▶│ forwarder │──┐            │
//!   (no credentials)      │  └──────────┘   └───────────┘  │ basic auth │
//!                         │                                ▼ injected   │
//!                         │                    Rancher service-proxy ───┼──▶ backend
//!                         │                                              │    service
//!                         │  ┌────────────────────────────────────────┐ │
//!                         │  │          Cross-Cutting Concerns         │ │
//!                         │  │  ┌────────┐ ┌────────┐ ┌─────────────┐ │ │
//!                         │  │  │ config │ │ health │ │observability│ │ │
//!                         │  │  └────────┘ └────────┘ └─────────────┘ │ │
//!                         │  │  ┌─────────────────────────────────┐   │ │
//!                         │  │  │       lifecycle (shutdown)       │   │ │
//!                         │  │  └─────────────────────────────────┘   │ │
//!                         │  └────────────────────────────────────────┘ │
//!                         └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod proxy;

// Cross-cutting concerns
pub mod health;
pub mod lifecycle;
pub mod observability;

pub use config::RelayConfig;
pub use http::RelayServer;
pub use lifecycle::Shutdown;
