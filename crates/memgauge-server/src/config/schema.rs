use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use memgauge_core::error::{MemgaugeError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub time: TimeSection,

    #[serde(default)]
    pub memory: MemorySection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            app: AppSection::default(),
            time: TimeSection::default(),
            memory: MemorySection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MemgaugeError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.app.validate()?;
        self.time.validate()?;
        self.memory.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MemgaugeError::Configuration(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    /// Value of the `app_name` label on `request_count`.
    #[serde(default = "default_app_name")]
    pub name: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self { name: default_app_name() }
    }
}

impl AppSection {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MemgaugeError::Configuration("app.name must not be empty".into()));
        }
        Ok(())
    }
}

/// Delay range of the `/time/` demo route.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeSection {
    #[serde(default = "default_max_secs")]
    pub max_secs: u64,
}

impl Default for TimeSection {
    fn default() -> Self {
        Self { max_secs: default_max_secs() }
    }
}

impl TimeSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=60).contains(&self.max_secs) {
            return Err(MemgaugeError::Configuration(
                "time.max_secs must be between 1 and 60".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemorySection {
    /// Directory holding one `<container id>/memory.usage_in_bytes` per container.
    #[serde(default = "default_memory_root")]
    pub root: PathBuf,

    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Fixed container list. Empty means: discover subdirectories of `root`.
    #[serde(default)]
    pub containers: Vec<ContainerEntry>,
}

impl Default for MemorySection {
    fn default() -> Self {
        Self {
            root: default_memory_root(),
            read_timeout_ms: default_read_timeout_ms(),
            containers: Vec::new(),
        }
    }
}

impl MemorySection {
    pub fn validate(&self) -> Result<()> {
        if !(10..=60000).contains(&self.read_timeout_ms) {
            return Err(MemgaugeError::Configuration(
                "memory.read_timeout_ms must be between 10 and 60000".into(),
            ));
        }
        for c in &self.containers {
            if c.id.trim().is_empty() || c.name.trim().is_empty() {
                return Err(MemgaugeError::Configuration(
                    "memory.containers entries need a non-empty id and name".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

fn default_listen() -> String {
    "0.0.0.0:5050".into()
}
fn default_app_name() -> String {
    "web-app".into()
}
fn default_max_secs() -> u64 {
    5
}
fn default_memory_root() -> PathBuf {
    PathBuf::from("/docker/memory")
}
fn default_read_timeout_ms() -> u64 {
    2000
}
fn default_log_filter() -> String {
    "info".into()
}
