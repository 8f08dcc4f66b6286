//! memgauge core: in-process metric state and Prometheus text exposition.
//!
//! This crate defines metric descriptors, the counter/gauge/summary variants,
//! labeled families, the registry and the text encoder, together with the
//! error surface shared by the server. It carries no transport or runtime
//! dependencies so it can be reused outside the HTTP server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `MemgaugeError`/`Result` so metrics
//! collection never takes down the serving path.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod encoding;
pub mod error;
pub mod family;
pub mod metric;
pub mod registry;
pub mod snapshot;

/// Shared result type.
pub use error::{Result, MemgaugeError};
pub use family::{CounterVec, Family, GaugeVec, SummaryVec};
pub use metric::{Counter, Gauge, Metric, MetricDescriptor, MetricKind, Summary};
pub use registry::Registry;
pub use snapshot::{RegistrySnapshot, Sample};
