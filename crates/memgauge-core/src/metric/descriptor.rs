use crate::error::{MemgaugeError, Result};

/// Metric type as written in the `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Summary,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Summary => "summary",
        }
    }
}

/// Immutable identity of a registered metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub label_names: Vec<String>,
}

impl MetricDescriptor {
    /// Build and validate a descriptor.
    ///
    /// Names follow the Prometheus data model: metric names match
    /// `[a-zA-Z_:][a-zA-Z0-9_:]*`, label names match `[a-zA-Z_][a-zA-Z0-9_]*`
    /// and may not start with `__`.
    pub fn new(name: &str, help: &str, kind: MetricKind, label_names: &[&str]) -> Result<Self> {
        if !is_metric_name(name) {
            return Err(MemgaugeError::Configuration(format!(
                "invalid metric name: {name:?}"
            )));
        }

        let mut labels: Vec<String> = Vec::with_capacity(label_names.len());
        for l in label_names {
            if !is_label_name(l) || l.starts_with("__") {
                return Err(MemgaugeError::Configuration(format!(
                    "invalid label name {l:?} on metric {name}"
                )));
            }
            if kind == MetricKind::Summary && *l == "quantile" {
                return Err(MemgaugeError::Configuration(format!(
                    "label \"quantile\" is reserved on summary {name}"
                )));
            }
            if labels.iter().any(|x| x == l) {
                return Err(MemgaugeError::Configuration(format!(
                    "duplicate label name {l:?} on metric {name}"
                )));
            }
            labels.push((*l).to_string());
        }

        Ok(Self {
            name: name.to_string(),
            help: help.to_string(),
            kind,
            label_names: labels,
        })
    }

    /// Same name, kind and label names (help text is not part of identity).
    pub fn same_shape(&self, other: &MetricDescriptor) -> bool {
        self.name == other.name && self.kind == other.kind && self.label_names == other.label_names
    }
}

fn is_metric_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

fn is_label_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
