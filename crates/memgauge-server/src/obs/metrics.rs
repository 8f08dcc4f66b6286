//! Application metric families.

use std::sync::Arc;
use std::time::Duration;

use memgauge_core::error::Result;
use memgauge_core::{Counter, CounterVec, GaugeVec, Registry, Summary};

pub const SCRAPES: &str = "scraping_metrics_counter";
pub const REQUESTS: &str = "request_count";
pub const REQUEST_TIME: &str = "request_processing_seconds";
pub const MEMORY_USAGE: &str = "memory_usage_mb";

pub struct AppMetrics {
    pub scrapes: Arc<Counter>,
    pub requests: Arc<CounterVec>,
    pub request_time: Arc<Summary>,
    pub memory_usage: Arc<GaugeVec>,
}

impl AppMetrics {
    /// Register all families. Registration order is exposition order.
    pub fn register(registry: &Registry) -> Result<Self> {
        let scrapes = registry
            .register_counter(SCRAPES, "Counts prometheus scraping metrics.", &[])?
            .get()?;
        let requests = registry.register_counter(
            REQUESTS,
            "App Request Count",
            &["app_name", "method", "endpoint", "http_status"],
        )?;
        let request_time = registry
            .register_summary(REQUEST_TIME, "Time spent processing request", &[])?
            .get()?;
        let memory_usage =
            registry.register_gauge(MEMORY_USAGE, "Memory Usage of Container in Megabyte.", &["name"])?;

        Ok(Self {
            scrapes,
            requests,
            request_time,
            memory_usage,
        })
    }

    pub fn record_scrape(&self) {
        self.scrapes.inc();
    }

    /// Count one finished request and observe its latency.
    ///
    /// Fail-open: a rejected label set is logged, never surfaced to the
    /// request being served.
    pub fn record_request(&self, app_name: &str, method: &str, endpoint: &str, status: u16, elapsed: Duration) {
        let status = status.to_string();
        match self.requests.with_labels(&[app_name, method, endpoint, status.as_str()]) {
            Ok(c) => c.inc(),
            Err(e) => tracing::warn!(error = %e, endpoint, "request counter update failed"),
        }
        self.request_time.observe(elapsed.as_secs_f64());
    }
}
