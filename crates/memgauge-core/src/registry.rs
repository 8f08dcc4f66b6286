//! Process-wide metric registry.
//!
//! Registration happens at startup and takes a write lock on an append-only
//! family list. Scrapes take the read lock only long enough to clone the
//! family handles; sampling then runs without the registry lock, so request
//! handlers updating series never wait on a scrape.

use std::any::Any;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::error::{MemgaugeError, Result};
use crate::family::{Collect, CounterVec, Family, GaugeVec, SummaryVec};
use crate::metric::{Metric, MetricDescriptor, MetricKind};
use crate::snapshot::RegistrySnapshot;

struct Registered {
    collector: Arc<dyn Collect>,
    handle: Arc<dyn Any + Send + Sync>,
}

#[derive(Default)]
pub struct Registry {
    families: RwLock<Vec<Registered>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a family, or return the existing one when a family with the
    /// same name, kind and label names is already registered.
    ///
    /// A name clash with a different kind or label set is a configuration
    /// error. The help text of the first registration is kept.
    pub fn register<M: Metric>(&self, desc: MetricDescriptor) -> Result<Arc<Family<M>>> {
        if desc.kind != M::KIND {
            return Err(MemgaugeError::Configuration(format!(
                "descriptor for {} declares {} but a {} was requested",
                desc.name,
                desc.kind.as_str(),
                M::KIND.as_str()
            )));
        }

        let mut families = self
            .families
            .write()
            .map_err(|_| MemgaugeError::Internal("metric registry lock poisoned".into()))?;

        if let Some(existing) = families.iter().find(|f| f.collector.descriptor().name == desc.name) {
            let current = existing.collector.descriptor();
            if !current.same_shape(&desc) {
                return Err(MemgaugeError::Configuration(format!(
                    "metric {} already registered as {} with labels {:?}",
                    current.name,
                    current.kind.as_str(),
                    current.label_names
                )));
            }
            return Arc::clone(&existing.handle)
                .downcast::<Family<M>>()
                .map_err(|_| MemgaugeError::Internal(format!("metric {} has a foreign type", desc.name)));
        }

        tracing::debug!(name = %desc.name, kind = desc.kind.as_str(), labels = ?desc.label_names, "metric registered");

        let family = Arc::new(Family::<M>::new(desc));
        families.push(Registered {
            collector: Arc::clone(&family) as Arc<dyn Collect>,
            handle: Arc::clone(&family) as Arc<dyn Any + Send + Sync>,
        });
        Ok(family)
    }

    pub fn register_counter(&self, name: &str, help: &str, labels: &[&str]) -> Result<Arc<CounterVec>> {
        self.register(MetricDescriptor::new(name, help, MetricKind::Counter, labels)?)
    }

    pub fn register_gauge(&self, name: &str, help: &str, labels: &[&str]) -> Result<Arc<GaugeVec>> {
        self.register(MetricDescriptor::new(name, help, MetricKind::Gauge, labels)?)
    }

    pub fn register_summary(&self, name: &str, help: &str, labels: &[&str]) -> Result<Arc<SummaryVec>> {
        self.register(MetricDescriptor::new(name, help, MetricKind::Summary, labels)?)
    }

    /// Descriptor of a registered family.
    pub fn descriptor(&self, name: &str) -> Result<Option<MetricDescriptor>> {
        let families = self.read()?;
        Ok(families
            .iter()
            .map(|f| f.collector.descriptor())
            .find(|d| d.name == name)
            .cloned())
    }

    /// Number of registered families.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Snapshot every family in registration order.
    pub fn snapshot_all(&self) -> Result<RegistrySnapshot> {
        let collectors: Vec<Arc<dyn Collect>> = {
            let families = self.read()?;
            families.iter().map(|f| Arc::clone(&f.collector)).collect()
        };

        Ok(RegistrySnapshot {
            families: collectors.iter().map(|c| c.collect()).collect(),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Registered>>> {
        self.families
            .read()
            .map_err(|_| MemgaugeError::Internal("metric registry lock poisoned".into()))
    }
}
