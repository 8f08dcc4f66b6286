//! Top-level facade crate for memgauge.
//!
//! Re-exports the metrics core and the HTTP server library so users can depend on a single crate.

pub mod core {
    pub use memgauge_core::*;
}

pub mod server {
    pub use memgauge_server::*;
}
