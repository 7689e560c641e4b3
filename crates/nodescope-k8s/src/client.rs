use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Node;
use kube::Api;
use kube::api::ListParams;
use tracing::debug;

use nodescope_types::{
    NodeRecord, OperatorCondition, OperatorInfo, UsageSample, VersionHistoryEntry, VersionInfo,
};

use crate::extract::{cpu_millis, memory_bytes, record_from_machine, record_from_node};
use crate::resources::{ClusterOperator, ClusterVersion, Machine, NodeMetrics};

/// Namespace the machine API keeps its Machine objects in.
const MACHINE_NAMESPACE: &str = "openshift-machine-api";

/// Name of the singleton ClusterVersion object.
const CLUSTER_VERSION_NAME: &str = "version";

/// Kubernetes client wrapper
pub struct KubeClient {
    client: kube::Client,
}

impl KubeClient {
    /// Connect using the ambient kubeconfig or in-cluster environment.
    pub async fn new() -> Result<Self> {
        let client = kube::Client::try_default()
            .await
            .context("Failed to create Kubernetes client. Is kubectl configured?")?;
        Ok(Self { client })
    }

    /// Fetch node records: the whole cluster, or a single node by name.
    pub async fn list_nodes(&self, name: Option<&str>) -> Result<Vec<NodeRecord>> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        let items = match name {
            Some(name) => {
                let node = nodes
                    .get(name)
                    .await
                    .context(format!("Failed to get node '{}'", name))?;
                vec![node]
            }
            None => {
                nodes
                    .list(&ListParams::default())
                    .await
                    .context("Failed to list nodes")?
                    .items
            }
        };
        debug!("fetched {} nodes", items.len());

        Ok(items.iter().map(record_from_node).collect())
    }

    /// Fetch machine records from the machine API namespace.
    pub async fn list_machines(&self) -> Result<Vec<NodeRecord>> {
        let machines: Api<Machine> = Api::namespaced(self.client.clone(), MACHINE_NAMESPACE);
        let list = machines
            .list(&ListParams::default())
            .await
            .context("Failed to list machines")?;
        debug!("fetched {} machines", list.items.len());

        Ok(list.items.iter().map(record_from_machine).collect())
    }

    /// Fetch per-node usage readings from the metrics API, reduced to
    /// base units.
    pub async fn list_node_metrics(&self) -> Result<Vec<UsageSample>> {
        let metrics: Api<NodeMetrics> = Api::all(self.client.clone());
        let list = metrics
            .list(&ListParams::default())
            .await
            .context("Failed to list node metrics")?;
        debug!("fetched metrics for {} nodes", list.items.len());

        Ok(list
            .items
            .into_iter()
            .map(|nm| UsageSample {
                node_name: nm.metadata.name.unwrap_or_default(),
                cpu_millis: cpu_millis(&nm.usage.cpu),
                memory_bytes: memory_bytes(&nm.usage.memory),
            })
            .collect())
    }

    /// Fetch the cluster's version object.
    pub async fn get_cluster_version(&self) -> Result<VersionInfo> {
        let versions: Api<ClusterVersion> = Api::all(self.client.clone());
        let cv = versions
            .get(CLUSTER_VERSION_NAME)
            .await
            .context("Failed to get cluster version")?;

        Ok(VersionInfo {
            history: cv
                .status
                .history
                .into_iter()
                .map(|h| VersionHistoryEntry {
                    state: h.state,
                    version: h.version,
                    completion_time: h.completion_time.map(|t| t.0),
                })
                .collect(),
            desired: cv.spec.desired_update.map(|u| u.version),
        })
    }

    /// Fetch cluster operators and their health conditions.
    pub async fn list_cluster_operators(&self) -> Result<Vec<OperatorInfo>> {
        let operators: Api<ClusterOperator> = Api::all(self.client.clone());
        let list = operators
            .list(&ListParams::default())
            .await
            .context("Failed to list cluster operators")?;
        debug!("fetched {} cluster operators", list.items.len());

        Ok(list
            .items
            .into_iter()
            .map(|co| OperatorInfo {
                name: co.metadata.name.unwrap_or_default(),
                conditions: co
                    .status
                    .conditions
                    .into_iter()
                    .map(|c| OperatorCondition {
                        condition_type: c.condition_type,
                        status: c.status,
                    })
                    .collect(),
            })
            .collect())
    }
}
