//! Kubernetes client for nodescope
//!
//! This crate fetches raw cluster state (nodes, machines, node metrics,
//! cluster version, cluster operators) and reduces it to the shared
//! record types.

mod client;
mod extract;
mod resources;

pub use client::KubeClient;
pub use extract::{cpu_millis, memory_bytes, record_from_machine, record_from_node};
pub use resources::{ClusterOperator, ClusterVersion, Machine, NodeMetrics};

// Re-export types that are used in our public API
pub use nodescope_types::{NodeRecord, OperatorInfo, UsageSample, VersionInfo};
