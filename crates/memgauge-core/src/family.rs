//! Labeled metric families.
//!
//! A family owns every child series of one descriptor, keyed by the ordered
//! label-value tuple. Children are created lazily on first use through the
//! map's entry API, so racing callers for the same tuple always end up with
//! one shared instance. Series are never evicted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{MemgaugeError, Result};
use crate::metric::{Counter, Gauge, Metric, MetricDescriptor, Summary};
use crate::snapshot::{FamilySnapshot, SeriesSnapshot};

pub type CounterVec = Family<Counter>;
pub type GaugeVec = Family<Gauge>;
pub type SummaryVec = Family<Summary>;

struct Series<M> {
    created_seq: u64,
    metric: Arc<M>,
}

pub struct Family<M: Metric> {
    desc: Arc<MetricDescriptor>,
    series: DashMap<Vec<String>, Series<M>>,
    seq: AtomicU64,
}

impl<M: Metric> Family<M> {
    /// Families without labels get their single child up front so the value
    /// line is exposed before first use.
    pub(crate) fn new(desc: MetricDescriptor) -> Self {
        let family = Self {
            desc: Arc::new(desc),
            series: DashMap::new(),
            seq: AtomicU64::new(0),
        };
        if family.desc.label_names.is_empty() {
            family.child(Vec::new());
        }
        family
    }

    pub fn descriptor(&self) -> &MetricDescriptor {
        &self.desc
    }

    /// Child for the given label values, created on first use.
    pub fn with_labels(&self, values: &[&str]) -> Result<Arc<M>> {
        let expected = self.desc.label_names.len();
        if values.len() != expected {
            return Err(MemgaugeError::InvalidArgument(format!(
                "metric {} expects {} label values, got {}",
                self.desc.name,
                expected,
                values.len()
            )));
        }

        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        if let Some(s) = self.series.get(&key) {
            return Ok(Arc::clone(&s.metric));
        }
        Ok(self.child(key))
    }

    /// The single child of an unlabeled family.
    pub fn get(&self) -> Result<Arc<M>> {
        self.with_labels(&[])
    }

    /// Number of live series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn child(&self, key: Vec<String>) -> Arc<M> {
        let entry = self.series.entry(key).or_insert_with(|| Series {
            created_seq: self.seq.fetch_add(1, Ordering::Relaxed),
            metric: Arc::new(M::default()),
        });
        Arc::clone(&entry.metric)
    }

    pub(crate) fn snapshot(&self) -> FamilySnapshot {
        let mut rows: Vec<(u64, SeriesSnapshot)> = self
            .series
            .iter()
            .map(|r| {
                (
                    r.value().created_seq,
                    SeriesSnapshot {
                        label_values: r.key().clone(),
                        sample: r.value().metric.sample(),
                    },
                )
            })
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);

        FamilySnapshot {
            descriptor: Arc::clone(&self.desc),
            series: rows.into_iter().map(|(_, s)| s).collect(),
        }
    }
}

/// Type-erased view used by the registry to snapshot heterogeneous families.
pub(crate) trait Collect: Send + Sync {
    fn descriptor(&self) -> &MetricDescriptor;
    fn collect(&self) -> FamilySnapshot;
}

impl<M: Metric> Collect for Family<M> {
    fn descriptor(&self) -> &MetricDescriptor {
        &self.desc
    }

    fn collect(&self) -> FamilySnapshot {
        self.snapshot()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::metric::MetricKind;
    use crate::snapshot::Sample;

    fn counter_vec(labels: &[&str]) -> CounterVec {
        Family::new(MetricDescriptor::new("hits", "Hits.", MetricKind::Counter, labels).unwrap())
    }

    #[test]
    fn unlabeled_family_has_one_series_from_start() {
        let f = counter_vec(&[]);
        assert_eq!(f.len(), 1);
        f.get().unwrap().inc();
        assert_eq!(f.snapshot().find(&[]), Some(Sample::Counter(1.0)));
    }

    #[test]
    fn labeled_family_starts_empty() {
        let f = counter_vec(&["path"]);
        assert!(f.is_empty());
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let f = counter_vec(&["method", "path"]);
        let err = f.with_labels(&["GET"]).err().unwrap();
        assert_eq!(err.client_code().as_str(), "INVALID_ARGUMENT");
        assert!(f.with_labels(&["GET", "/", "x"]).is_err());
        assert!(f.is_empty());
    }

    #[test]
    fn same_tuple_returns_same_instance() {
        let f = counter_vec(&["path"]);
        let a = f.with_labels(&["/"]).unwrap();
        let b = f.with_labels(&["/"]).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn snapshot_keeps_first_seen_order() {
        let f = counter_vec(&["path"]);
        for p in ["/z", "/a", "/m", "/a", "/z"] {
            f.with_labels(&[p]).unwrap().inc();
        }
        let order: Vec<String> = f
            .snapshot()
            .series
            .into_iter()
            .map(|s| s.label_values[0].clone())
            .collect();
        assert_eq!(order, vec!["/z", "/a", "/m"]);
    }

    #[test]
    fn concurrent_first_use_creates_one_series() {
        let f = Arc::new(counter_vec(&["path"]));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let f = Arc::clone(&f);
                std::thread::spawn(move || {
                    let c = f.with_labels(&["/race"]).unwrap();
                    c.inc();
                    c
                })
            })
            .collect();
        let children: Vec<Arc<Counter>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(f.len(), 1);
        assert!(children.iter().all(|c| Arc::ptr_eq(c, &children[0])));
        assert_eq!(children[0].get(), 16.0);
    }
}
