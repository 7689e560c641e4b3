//! Typed definitions for the non-core API objects this tool reads.
//!
//! The machine API (machine.openshift.io), the config API
//! (config.openshift.io) and the metrics API (metrics.k8s.io) are not
//! part of k8s-openapi, so the fields we consume are declared locally
//! and wired into the client through the `k8s_openapi::Resource` and
//! `Metadata` traits.

use k8s_openapi::api::core::v1::ObjectReference;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use serde::{Deserialize, Serialize};

// ============================================================================
// machine.openshift.io/v1beta1
// ============================================================================

/// A Machine object, reduced to the status fields we read.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Machine {
    pub metadata: ObjectMeta,
    pub status: Option<MachineStatus>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineStatus {
    /// Reference to the bound node, once one exists.
    pub node_ref: Option<ObjectReference>,

    /// Lifecycle phase; absent while the machine controller has not
    /// reported one yet.
    pub phase: Option<String>,
}

impl k8s_openapi::Resource for Machine {
    type Scope = k8s_openapi::NamespaceResourceScope;

    const API_VERSION: &'static str = "machine.openshift.io/v1beta1";
    const GROUP: &'static str = "machine.openshift.io";
    const KIND: &'static str = "Machine";
    const URL_PATH_SEGMENT: &'static str = "machines";
    const VERSION: &'static str = "v1beta1";
}

impl k8s_openapi::Metadata for Machine {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &Self::Ty {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Self::Ty {
        &mut self.metadata
    }
}

// ============================================================================
// metrics.k8s.io/v1beta1
// ============================================================================

/// Per-node usage as served by metrics-server.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NodeMetrics {
    pub metadata: ObjectMeta,
    pub timestamp: String,
    pub window: String,
    pub usage: NodeUsage,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NodeUsage {
    pub cpu: Quantity,
    pub memory: Quantity,
}

impl k8s_openapi::Resource for NodeMetrics {
    type Scope = k8s_openapi::ClusterResourceScope;

    const API_VERSION: &'static str = "metrics.k8s.io/v1beta1";
    const GROUP: &'static str = "metrics.k8s.io";
    const KIND: &'static str = "NodeMetrics";
    const URL_PATH_SEGMENT: &'static str = "nodes";
    const VERSION: &'static str = "v1beta1";
}

impl k8s_openapi::Metadata for NodeMetrics {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &Self::Ty {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Self::Ty {
        &mut self.metadata
    }
}

// ============================================================================
// config.openshift.io/v1
// ============================================================================

/// The singleton ClusterVersion object.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClusterVersion {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ClusterVersionSpec,
    #[serde(default)]
    pub status: ClusterVersionStatus,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterVersionSpec {
    pub desired_update: Option<Update>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Update {
    #[serde(default)]
    pub version: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClusterVersionStatus {
    #[serde(default)]
    pub history: Vec<UpdateHistory>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHistory {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub version: String,
    pub completion_time: Option<Time>,
}

impl k8s_openapi::Resource for ClusterVersion {
    type Scope = k8s_openapi::ClusterResourceScope;

    const API_VERSION: &'static str = "config.openshift.io/v1";
    const GROUP: &'static str = "config.openshift.io";
    const KIND: &'static str = "ClusterVersion";
    const URL_PATH_SEGMENT: &'static str = "clusterversions";
    const VERSION: &'static str = "v1";
}

impl k8s_openapi::Metadata for ClusterVersion {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &Self::Ty {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Self::Ty {
        &mut self.metadata
    }
}

/// A ClusterOperator object, reduced to its health conditions.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClusterOperator {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: ClusterOperatorStatus,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClusterOperatorStatus {
    #[serde(default)]
    pub conditions: Vec<OperatorStatusCondition>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct OperatorStatusCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    #[serde(default)]
    pub status: String,
}

impl k8s_openapi::Resource for ClusterOperator {
    type Scope = k8s_openapi::ClusterResourceScope;

    const API_VERSION: &'static str = "config.openshift.io/v1";
    const GROUP: &'static str = "config.openshift.io";
    const KIND: &'static str = "ClusterOperator";
    const URL_PATH_SEGMENT: &'static str = "clusteroperators";
    const VERSION: &'static str = "v1";
}

impl k8s_openapi::Metadata for ClusterOperator {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &Self::Ty {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Self::Ty {
        &mut self.metadata
    }
}
