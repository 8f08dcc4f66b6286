//! In-process metrics for the server.
//!
//! `metrics` registers the application's metric families on a registry
//! passed in at startup; `middleware` wraps every application route and
//! records request counts and latency. Metrics are rendered by the
//! `/metrics` and `/memory/` handlers.

pub mod metrics;
pub mod middleware;

pub use metrics::AppMetrics;
