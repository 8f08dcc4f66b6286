use crate::snapshot::Sample;

use super::{AtomicF64, Metric, MetricKind};

/// Point-in-time settable value.
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicF64,
}

impl Gauge {
    pub fn set(&self, v: f64) {
        self.value.store(v);
    }

    pub fn inc(&self) {
        self.value.add(1.0);
    }

    pub fn dec(&self) {
        self.value.add(-1.0);
    }

    /// Add an arbitrary signed delta.
    pub fn add(&self, delta: f64) {
        self.value.add(delta);
    }

    pub fn sub(&self, delta: f64) {
        self.value.add(-delta);
    }

    pub fn get(&self) -> f64 {
        self.value.load()
    }
}

impl Metric for Gauge {
    const KIND: MetricKind = MetricKind::Gauge;

    fn sample(&self) -> Sample {
        Sample::Gauge(self.get())
    }
}
