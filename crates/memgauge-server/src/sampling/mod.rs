//! External sampling of per-container memory usage.
//!
//! Containers are enumerated through [`ContainerRuntime`]; each one's cgroup
//! accounting file is read independently, so one failing or hanging container
//! never blocks the others or the scrape that triggered the sample.

pub mod memory;
pub mod runtime;

pub use memory::{MemorySampler, SampleOutcome, USAGE_FILE};
pub use runtime::{CgroupDirRuntime, ContainerInfo, ContainerRuntime, StaticRuntime};
