//! Point-in-time, read-only view of registry state.
//!
//! Built fresh for every scrape and never cached. Each individual value is
//! read atomically; the snapshot as a whole is not a transaction across
//! metrics.

use std::sync::Arc;

use crate::metric::MetricDescriptor;

/// One sampled value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Counter(f64),
    Gauge(f64),
    Summary { count: u64, sum: f64 },
}

/// One labeled series of a family.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSnapshot {
    /// Ordered like the descriptor's label names.
    pub label_values: Vec<String>,
    pub sample: Sample,
}

/// All series of one metric, in first-seen order.
#[derive(Debug, Clone)]
pub struct FamilySnapshot {
    pub descriptor: Arc<MetricDescriptor>,
    pub series: Vec<SeriesSnapshot>,
}

impl FamilySnapshot {
    /// Sample for an exact label-value tuple.
    pub fn find(&self, label_values: &[&str]) -> Option<Sample> {
        self.series
            .iter()
            .find(|s| s.label_values.iter().map(String::as_str).eq(label_values.iter().copied()))
            .map(|s| s.sample)
    }
}

/// Every family in registration order.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    pub families: Vec<FamilySnapshot>,
}

impl RegistrySnapshot {
    pub fn family(&self, name: &str) -> Option<&FamilySnapshot> {
        self.families.iter().find(|f| f.descriptor.name == name)
    }
}
