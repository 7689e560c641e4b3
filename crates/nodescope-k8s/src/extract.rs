//! Record extractors: raw API objects in, normalized records out.
//!
//! Extraction never fails. Absent optional fields map to the record's
//! zero-value defaults, so partially-populated objects (a machine still
//! provisioning, a node with no machine annotation) come through as
//! partially-populated records.

use k8s_openapi::api::core::v1::Node;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use nodescope_types::{NodeRecord, ResourceMetric};

use crate::resources::Machine;

const MACHINE_ANNOTATION: &str = "machine.openshift.io/machine";
const CURRENT_CONFIG_ANNOTATION: &str = "machineconfiguration.openshift.io/currentConfig";
const DESIRED_CONFIG_ANNOTATION: &str = "machineconfiguration.openshift.io/desiredConfig";

/// Role labels scanned in priority order; the label suffix becomes the
/// role tag.
const ROLE_LABELS: [&str; 3] = [
    "node-role.kubernetes.io/master",
    "node-role.kubernetes.io/infra",
    "node-role.kubernetes.io/worker",
];

/// Build a record from a Node object.
pub fn record_from_node(node: &Node) -> NodeRecord {
    let mut record = NodeRecord {
        node_name: node.metadata.name.clone().unwrap_or_default(),
        created: node.metadata.creation_timestamp.as_ref().map(|t| t.0),
        ..NodeRecord::default()
    };

    if let Some(spec) = &node.spec {
        record.cordoned = spec.unschedulable.unwrap_or(false);
    }

    if let Some(status) = &node.status {
        if let Some(addresses) = &status.addresses {
            if let Some(addr) = addresses.iter().find(|a| a.type_ == "InternalIP") {
                record.internal_ip = addr.address.clone();
            }
        }
        if let Some(conditions) = &status.conditions {
            for condition in conditions {
                let active = condition.status == "True";
                match condition.type_.as_str() {
                    "Ready" => record.ready = active,
                    "MemoryPressure" => record.memory_pressure = active,
                    "DiskPressure" => record.disk_pressure = active,
                    _ => {}
                }
            }
        }
        if let Some(allocatable) = &status.allocatable {
            record.cpu = allocatable
                .get("cpu")
                .map(|q| ResourceMetric::new(cpu_millis(q)));
            record.memory = allocatable
                .get("memory")
                .map(|q| ResourceMetric::new(memory_bytes(q)));
        }
    }

    if let Some(annotations) = &node.metadata.annotations {
        if let Some(machine) = annotations.get(MACHINE_ANNOTATION) {
            record.machine_name = name_suffix(machine).to_string();
        }
        if let (Some(current), Some(desired)) = (
            annotations.get(CURRENT_CONFIG_ANNOTATION),
            annotations.get(DESIRED_CONFIG_ANNOTATION),
        ) {
            record.updating = current != desired;
        }
    }

    if let Some(labels) = &node.metadata.labels {
        for label in ROLE_LABELS {
            if labels.contains_key(label) {
                record.roles.push(name_suffix(label).to_string());
            }
        }
    }

    record
}

/// Build a record from a Machine object.
///
/// The phase is optional on the wire; an absent phase extracts as an
/// empty string instead of failing.
pub fn record_from_machine(machine: &Machine) -> NodeRecord {
    let mut record = NodeRecord {
        machine_name: machine.metadata.name.clone().unwrap_or_default(),
        ..NodeRecord::default()
    };

    if let Some(status) = &machine.status {
        if let Some(node_ref) = &status.node_ref {
            if node_ref.kind.as_deref() == Some("Node") {
                record.node_name = node_ref.name.clone().unwrap_or_default();
            }
        }
        record.machine_phase = status.phase.clone().unwrap_or_default();
    }

    record
}

/// Parse a cpu quantity into millicores. Unparseable input degrades to 0.
pub fn cpu_millis(quantity: &Quantity) -> i64 {
    (parse_quantity(&quantity.0) * 1000.0).round() as i64
}

/// Parse a memory quantity into bytes. Unparseable input degrades to 0.
pub fn memory_bytes(quantity: &Quantity) -> i64 {
    parse_quantity(&quantity.0).round() as i64
}

/// Decode the kubernetes quantity grammar into base units: a decimal
/// value with an optional binary (Ki..Ei), decimal (k..E) or milli
/// suffix.
fn parse_quantity(raw: &str) -> f64 {
    const KI: f64 = 1024.0;
    const SUFFIXES: [(&str, f64); 13] = [
        ("Ki", KI),
        ("Mi", KI * KI),
        ("Gi", KI * KI * KI),
        ("Ti", KI * KI * KI * KI),
        ("Pi", KI * KI * KI * KI * KI),
        ("Ei", KI * KI * KI * KI * KI * KI),
        ("m", 1e-3),
        ("k", 1e3),
        ("M", 1e6),
        ("G", 1e9),
        ("T", 1e12),
        ("P", 1e15),
        ("E", 1e18),
    ];

    let raw = raw.trim();
    for (suffix, multiplier) in SUFFIXES {
        if let Some(value) = raw.strip_suffix(suffix) {
            return value.parse::<f64>().map_or(0.0, |v| v * multiplier);
        }
    }
    raw.parse::<f64>().unwrap_or(0.0)
}

/// Everything after the last '/', or the whole value when there is none.
fn name_suffix(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}
