//! Shared types for nodescope
//!
//! This crate contains the cluster data model used across the nodescope
//! crates: merged node records, resource metrics, cluster-level state,
//! and the snapshot aggregate that ties them together.

mod snapshot;

pub use snapshot::ClusterSnapshot;

use chrono::{DateTime, Utc};
use thiserror::Error;

// ============================================================================
// Node Records
// ============================================================================

/// One cluster member, merged from up to two source objects: the Node and
/// the Machine backing it. Either name may be empty, but never both.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeRecord {
    /// Node object name; empty when only a machine was observed.
    pub node_name: String,

    /// Backing machine name; empty when no machine is associated.
    pub machine_name: String,

    /// Machine lifecycle phase ("Provisioning", "Failed", ...); empty when
    /// unknown or when the record has no machine.
    pub machine_phase: String,

    /// First internal address reported by the node.
    pub internal_ip: String,

    /// Role tags in priority order (master, infra, worker).
    pub roles: Vec<String>,

    pub ready: bool,
    pub cordoned: bool,
    pub updating: bool,
    pub memory_pressure: bool,
    pub disk_pressure: bool,

    /// Set when no node object exists for this entry.
    pub missing: bool,

    /// Node creation time, when known.
    pub created: Option<DateTime<Utc>>,

    /// CPU capacity and usage, in millicores.
    pub cpu: Option<ResourceMetric>,

    /// Memory capacity and usage, in bytes.
    pub memory: Option<ResourceMetric>,
}

impl NodeRecord {
    /// Whether the record carries at least one name to key it by.
    pub fn has_identity(&self) -> bool {
        !self.node_name.is_empty() || !self.machine_name.is_empty()
    }
}

/// Allocatable capacity and, once annotated, current usage for a single
/// resource. Values are in a fixed base unit: millicores for cpu, bytes
/// for memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResourceMetric {
    pub allocatable: i64,

    /// Unset until the metrics annotator has run.
    pub utilization: Option<i64>,
}

impl ResourceMetric {
    pub fn new(allocatable: i64) -> Self {
        Self {
            allocatable,
            utilization: None,
        }
    }

    /// Utilization as a percentage of allocatable. None before annotation,
    /// and None when allocatable is zero (the ratio is undefined, not
    /// infinite).
    pub fn percent(&self) -> Option<f64> {
        let used = self.utilization?;
        if self.allocatable == 0 {
            return None;
        }
        Some(used as f64 / self.allocatable as f64 * 100.0)
    }
}

/// Record construction and merge errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record has neither node name nor machine name")]
    MissingIdentity,
}

// ============================================================================
// Metrics Samples
// ============================================================================

/// One node's usage reading, already reduced to base units.
#[derive(Clone, Debug)]
pub struct UsageSample {
    pub node_name: String,
    pub cpu_millis: i64,
    pub memory_bytes: i64,
}

// ============================================================================
// Cluster-level State
// ============================================================================

/// One entry in the cluster's update history.
#[derive(Clone, Debug)]
pub struct VersionHistoryEntry {
    pub state: String,
    pub version: String,
    pub completion_time: Option<DateTime<Utc>>,
}

/// Cluster version data: past updates plus the desired one, if any.
#[derive(Clone, Debug, Default)]
pub struct VersionInfo {
    pub history: Vec<VersionHistoryEntry>,
    pub desired: Option<String>,
}

impl VersionInfo {
    /// The most recently completed version, by completion time.
    pub fn current(&self) -> Option<&str> {
        let mut best: Option<&VersionHistoryEntry> = None;
        for entry in &self.history {
            if entry.state != "Completed" {
                continue;
            }
            let newer = match best {
                None => true,
                Some(b) => match (b.completion_time, entry.completion_time) {
                    (Some(current), Some(candidate)) => candidate > current,
                    (None, Some(_)) => true,
                    _ => false,
                },
            };
            if newer {
                best = Some(entry);
            }
        }
        best.map(|e| e.version.as_str())
    }

    /// The update in flight: the desired version, when it differs from the
    /// current one.
    pub fn pending(&self) -> Option<&str> {
        let desired = self.desired.as_deref()?;
        if Some(desired) == self.current() {
            return None;
        }
        Some(desired)
    }
}

/// Health conditions reported by one cluster operator.
#[derive(Clone, Debug)]
pub struct OperatorInfo {
    pub name: String,
    pub conditions: Vec<OperatorCondition>,
}

#[derive(Clone, Debug)]
pub struct OperatorCondition {
    pub condition_type: String,
    pub status: String,
}

// ============================================================================
// Display Configuration
// ============================================================================

/// Display toggles, passed explicitly into the pipeline and renderer.
#[derive(Clone, Copy, Debug)]
pub struct DisplayOptions {
    pub show_usage: bool,
    pub show_keys: bool,
    pub show_version: bool,
    pub show_operators: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_usage: true,
            show_keys: false,
            show_version: true,
            show_operators: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(state: &str, version: &str, completed: Option<i64>) -> VersionHistoryEntry {
        VersionHistoryEntry {
            state: state.to_string(),
            version: version.to_string(),
            completion_time: completed.map(|s| Utc.timestamp_opt(s, 0).unwrap()),
        }
    }

    #[test]
    fn test_percent_of_zero_allocatable_is_undefined() {
        let metric = ResourceMetric {
            allocatable: 0,
            utilization: Some(250),
        };
        assert_eq!(metric.percent(), None);
    }

    #[test]
    fn test_percent_unset_before_annotation() {
        assert_eq!(ResourceMetric::new(4000).percent(), None);
    }

    #[test]
    fn test_percent() {
        let metric = ResourceMetric {
            allocatable: 4000,
            utilization: Some(1000),
        };
        assert_eq!(metric.percent(), Some(25.0));
    }

    #[test]
    fn test_current_version_picks_latest_completed() {
        let info = VersionInfo {
            history: vec![
                entry("Completed", "4.12.1", Some(2_000)),
                entry("Partial", "4.13.0", None),
                entry("Completed", "4.11.9", Some(1_000)),
            ],
            desired: None,
        };
        assert_eq!(info.current(), Some("4.12.1"));
    }

    #[test]
    fn test_current_version_none_without_completed_history() {
        let info = VersionInfo {
            history: vec![entry("Partial", "4.13.0", None)],
            desired: None,
        };
        assert_eq!(info.current(), None);
    }

    #[test]
    fn test_pending_update_differs_from_current() {
        let mut info = VersionInfo {
            history: vec![entry("Completed", "4.12.1", Some(2_000))],
            desired: Some("4.13.0".to_string()),
        };
        assert_eq!(info.pending(), Some("4.13.0"));

        info.desired = Some("4.12.1".to_string());
        assert_eq!(info.pending(), None);
    }
}
