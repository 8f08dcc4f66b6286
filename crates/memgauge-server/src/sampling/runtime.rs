use std::path::PathBuf;

use async_trait::async_trait;

use memgauge_core::error::{MemgaugeError, Result};

use crate::config::ContainerEntry;

/// Docker-style short id length.
const SHORT_ID_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub id: String,
    pub name: String,
}

/// Source of the containers to sample.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    async fn list(&self) -> Result<Vec<ContainerInfo>>;
}

/// Fixed container list taken from config.
pub struct StaticRuntime {
    containers: Vec<ContainerInfo>,
}

impl StaticRuntime {
    pub fn new(containers: Vec<ContainerInfo>) -> Self {
        Self { containers }
    }

    pub fn from_config(entries: &[ContainerEntry]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|e| ContainerInfo { id: e.id.clone(), name: e.name.clone() })
                .collect(),
        )
    }
}

#[async_trait]
impl ContainerRuntime for StaticRuntime {
    async fn list(&self) -> Result<Vec<ContainerInfo>> {
        Ok(self.containers.clone())
    }
}

/// Treats every subdirectory of the memory accounting root as one container,
/// named by its short id.
pub struct CgroupDirRuntime {
    root: PathBuf,
}

impl CgroupDirRuntime {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ContainerRuntime for CgroupDirRuntime {
    async fn list(&self) -> Result<Vec<ContainerInfo>> {
        let root = self.root.display().to_string();
        let mut dir = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| MemgaugeError::sampling(&root, e))?;

        let mut out = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|e| MemgaugeError::sampling(&root, e))? {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            let Ok(id) = entry.file_name().into_string() else {
                tracing::debug!(root = %root, "skipping non-utf8 container directory");
                continue;
            };
            let name: String = id.chars().take(SHORT_ID_LEN).collect();
            out.push(ContainerInfo { id, name });
        }

        // read_dir order is filesystem dependent
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }
}
