//! Prometheus text exposition format (version 0.0.4).
//!
//! Output per family:
//!
//! ```text
//! # HELP <name> <help>
//! # TYPE <name> <kind>
//! <name>{<label>="<value>",...} <value>
//! ```
//!
//! Summaries emit `<name>_count` and `<name>_sum` per series. Families appear
//! in registration order and series in first-seen order, so encoding the same
//! state twice yields byte-identical output.

use std::fmt::Write;

use crate::error::Result;
use crate::registry::Registry;
use crate::snapshot::{FamilySnapshot, RegistrySnapshot, Sample};

/// Content type for the exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Snapshot the registry and encode it.
pub fn encode_registry(registry: &Registry) -> Result<String> {
    Ok(encode(&registry.snapshot_all()?))
}

pub fn encode(snapshot: &RegistrySnapshot) -> String {
    let mut out = String::new();
    for family in &snapshot.families {
        encode_family(family, &mut out);
    }
    out
}

fn encode_family(family: &FamilySnapshot, out: &mut String) {
    let d = &family.descriptor;
    let _ = writeln!(out, "# HELP {} {}", d.name, escape_help(&d.help));
    let _ = writeln!(out, "# TYPE {} {}", d.name, d.kind.as_str());

    for s in &family.series {
        let labels = label_str(&d.label_names, &s.label_values);
        match s.sample {
            Sample::Counter(v) | Sample::Gauge(v) => {
                let _ = writeln!(out, "{}{} {}", d.name, labels, format_value(v));
            }
            Sample::Summary { count, sum } => {
                let _ = writeln!(out, "{}_count{} {}", d.name, labels, count);
                let _ = writeln!(out, "{}_sum{} {}", d.name, labels, format_value(sum));
            }
        }
    }
}

/// `{a="x",b="y"}`, or nothing for an unlabeled series.
fn label_str(names: &[String], values: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }
    let pairs = names
        .iter()
        .zip(values)
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", pairs)
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        // Display prints integral floats without a fraction ("3") and the
        // shortest round-trip form otherwise.
        v.to_string()
    }
}
