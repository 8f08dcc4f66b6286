//! memgauge HTTP server library entry.
//!
//! Wires config, the metric registry, request instrumentation and the
//! container memory sampler into an axum application. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
pub mod sampling;
