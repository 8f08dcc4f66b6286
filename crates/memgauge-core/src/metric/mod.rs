//! Metric variants and their shared plumbing.
//!
//! Counters and gauges keep their value in an atomic so request handlers can
//! update it concurrently without locks. Floats are stored as raw bit
//! patterns inside `AtomicU64` and updated with compare-and-swap. Summaries
//! update two numbers as one unit and use a per-series mutex instead.

pub mod counter;
pub mod descriptor;
pub mod gauge;
pub mod summary;

use std::sync::atomic::{AtomicU64, Ordering};

pub use counter::Counter;
pub use descriptor::{MetricDescriptor, MetricKind};
pub use gauge::Gauge;
pub use summary::{Summary, SummaryTimer};

use crate::snapshot::Sample;

/// Behaviour shared by every metric variant stored in a [`crate::Family`].
pub trait Metric: Default + Send + Sync + 'static {
    /// Kind reported in the `# TYPE` line.
    const KIND: MetricKind;

    /// Point-in-time read of the current state.
    fn sample(&self) -> Sample;
}

/// `f64` cell with atomic load/store/add.
#[derive(Debug, Default)]
pub(crate) struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub(crate) fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Release);
    }

    pub(crate) fn add(&self, delta: f64) {
        let mut cur = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(cur, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(actual) => cur = actual,
            }
        }
    }
}
