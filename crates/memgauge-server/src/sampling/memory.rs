use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;

use memgauge_core::error::{MemgaugeError, Result};
use memgauge_core::GaugeVec;

use super::runtime::{ContainerInfo, ContainerRuntime};

/// cgroup v1 memory accounting file inside each container directory.
pub const USAGE_FILE: &str = "memory.usage_in_bytes";

const MIB: f64 = (1u64 << 20) as f64;

/// Memory in MiB on success.
pub type SampleOutcome = Result<f64>;

/// Reads container memory usage and publishes it on a gauge labeled by
/// container name.
///
/// A failed read leaves the gauge's previous value for that container
/// untouched and is reported only through logs and the returned outcomes.
///
/// Reads go through `tokio::fs`, which runs them on the blocking pool. A read
/// that hits `read_timeout` returns an error to the sampler, but its pool
/// thread stays parked until the file unblocks.
pub struct MemorySampler {
    runtime: Arc<dyn ContainerRuntime>,
    root: PathBuf,
    read_timeout: Duration,
    gauge: Arc<GaugeVec>,
}

impl MemorySampler {
    pub fn new(
        runtime: Arc<dyn ContainerRuntime>,
        root: impl Into<PathBuf>,
        read_timeout: Duration,
        gauge: Arc<GaugeVec>,
    ) -> Self {
        Self {
            runtime,
            root: root.into(),
            read_timeout,
            gauge,
        }
    }

    /// Sample every container once. Never fails; per-container errors are in
    /// the returned outcomes.
    pub async fn sample(&self) -> Vec<(String, SampleOutcome)> {
        let containers = match self.runtime.list().await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "listing containers failed");
                return Vec::new();
            }
        };

        let results = join_all(containers.iter().map(|c| self.read_usage(c))).await;

        let mut outcomes = Vec::with_capacity(containers.len());
        for (c, res) in containers.into_iter().zip(results) {
            let outcome = res.and_then(|mib| {
                self.gauge.with_labels(&[c.name.as_str()])?.set(mib);
                Ok(mib)
            });
            match &outcome {
                Ok(mib) => tracing::debug!(container = %c.name, mib, "memory sampled"),
                Err(e) => tracing::warn!(container = %c.name, id = %c.id, error = %e, "failed to update memory metric"),
            }
            outcomes.push((c.name, outcome));
        }
        outcomes
    }

    async fn read_usage(&self, c: &ContainerInfo) -> Result<f64> {
        if !is_single_component(&c.id) {
            return Err(MemgaugeError::sampling(&c.name, format!("invalid container id {:?}", c.id)));
        }

        let path = self.root.join(&c.id).join(USAGE_FILE);
        let raw = match tokio::time::timeout(self.read_timeout, tokio::fs::read_to_string(&path)).await {
            Ok(Ok(s)) => s,
            Ok(Err(e)) => {
                return Err(MemgaugeError::sampling(&c.name, format!("{}: {e}", path.display())));
            }
            Err(_) => {
                return Err(MemgaugeError::sampling(
                    &c.name,
                    format!("{}: read timed out after {:?}", path.display(), self.read_timeout),
                ));
            }
        };

        let bytes: u64 = raw
            .trim()
            .parse()
            .map_err(|e| MemgaugeError::sampling(&c.name, format!("{}: {e}", path.display())))?;
        Ok(bytes as f64 / MIB)
    }
}

fn is_single_component(id: &str) -> bool {
    let mut parts = Path::new(id).components();
    matches!((parts.next(), parts.next()), (Some(Component::Normal(_)), None))
}

#[cfg(test)]
mod tests {
    use super::is_single_component;

    #[test]
    fn container_ids_must_be_plain_names() {
        assert!(is_single_component("3f2a9c1b7d4e"));
        assert!(!is_single_component(""));
        assert!(!is_single_component(".."));
        assert!(!is_single_component("a/b"));
        assert!(!is_single_component("/etc"));
    }
}
