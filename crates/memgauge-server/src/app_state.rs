//! Shared application state.
//!
//! Holds the metric registry handle, the registered application metrics and
//! the memory sampler. Built once at startup; every handler receives a cheap
//! clone.

use std::sync::Arc;

use memgauge_core::encoding::encode_registry;
use memgauge_core::error::Result;
use memgauge_core::Registry;

use crate::config::AppConfig;
use crate::obs::AppMetrics;
use crate::sampling::{CgroupDirRuntime, ContainerRuntime, MemorySampler, StaticRuntime};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AppConfig,
    registry: Arc<Registry>,
    metrics: AppMetrics,
    sampler: MemorySampler,
}

impl AppState {
    /// Build state with the container source selected by config: the fixed
    /// `memory.containers` list when present, directory discovery otherwise.
    pub fn new(cfg: AppConfig) -> Result<Self> {
        let runtime: Arc<dyn ContainerRuntime> = if cfg.memory.containers.is_empty() {
            Arc::new(CgroupDirRuntime::new(cfg.memory.root.clone()))
        } else {
            Arc::new(StaticRuntime::from_config(&cfg.memory.containers))
        };
        Self::with_runtime(cfg, runtime)
    }

    /// Returns Result so registration conflicts fail startup instead of panicking.
    pub fn with_runtime(cfg: AppConfig, runtime: Arc<dyn ContainerRuntime>) -> Result<Self> {
        let registry = Arc::new(Registry::new());
        let metrics = AppMetrics::register(&registry)?;
        let sampler = MemorySampler::new(
            runtime,
            cfg.memory.root.clone(),
            cfg.memory.read_timeout(),
            Arc::clone(&metrics.memory_usage),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                metrics,
                sampler,
            }),
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn metrics(&self) -> &AppMetrics {
        &self.inner.metrics
    }

    pub fn sampler(&self) -> &MemorySampler {
        &self.inner.sampler
    }

    /// Exposition text of the whole registry.
    pub fn render_metrics(&self) -> Result<String> {
        encode_registry(&self.inner.registry)
    }
}
