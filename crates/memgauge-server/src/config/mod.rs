//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use memgauge_core::error::{MemgaugeError, Result};

pub use schema::{
    AppConfig, AppSection, ContainerEntry, LoggingSection, MemorySection, ServerSection, TimeSection,
};

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MemgaugeError::Configuration(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| MemgaugeError::Configuration(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
