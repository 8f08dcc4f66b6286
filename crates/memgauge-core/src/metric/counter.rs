use crate::error::{MemgaugeError, Result};
use crate::snapshot::Sample;

use super::{AtomicF64, Metric, MetricKind};

/// Monotonically non-decreasing accumulated value.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicF64,
}

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.value.add(1.0);
    }

    /// Increment by `amount`. Negative or NaN amounts are rejected and the
    /// counter is left unchanged.
    pub fn inc_by(&self, amount: f64) -> Result<()> {
        if amount.is_nan() || amount < 0.0 {
            return Err(MemgaugeError::InvalidArgument(format!(
                "counter increment must be non-negative, got {amount}"
            )));
        }
        self.value.add(amount);
        Ok(())
    }

    pub fn get(&self) -> f64 {
        self.value.load()
    }
}

impl Metric for Counter {
    const KIND: MetricKind = MetricKind::Counter;

    fn sample(&self) -> Sample {
        Sample::Counter(self.get())
    }
}
