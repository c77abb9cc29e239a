//! MysqlCluster Custom Resource Definition
//!
//! A MysqlCluster declares one replicated MySQL cluster: the MySQL version,
//! instance resources, volume, configuration, and optionally the orchestrator
//! that tracks its replication topology.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::{CustomResource, Resource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{MysqlConf, PodSpec, VolumeSpec};

#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "titanium.presslabs.net",
    version = "v1alpha1",
    kind = "MysqlCluster",
    namespaced,
    status = "ClusterStatus",
    shortname = "mysql",
    printcolumn = r#"{"name":"Version","type":"string","jsonPath":".spec.mysqlVersion"}"#,
    printcolumn = r#"{"name":"Replicas","type":"integer","jsonPath":".spec.replicas"}"#,
    printcolumn = r#"{"name":"Ready","type":"integer","jsonPath":".status.readyNodes"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    #[serde(default = "default_replicas")]
    pub replicas: i32,

    /// MySQL image tag; defaults to the operator's configured tag
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mysql_version: String,

    #[serde(default)]
    pub pod_spec: PodSpec,

    #[serde(default)]
    pub volume_spec: VolumeSpec,

    #[serde(default, skip_serializing_if = "MysqlConf::is_empty")]
    pub mysql_conf: MysqlConf,

    /// Orchestrator base URI for this cluster, overrides the operator default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orchestrator_uri: Option<String>,

    /// Secret with the credentials orchestrator uses to reach the instances
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orchestrator_topology_secret_name: Option<String>,
}

fn default_replicas() -> i32 {
    1
}

impl Default for ClusterSpec {
    fn default() -> Self {
        Self {
            replicas: default_replicas(),
            mysql_version: String::new(),
            pod_spec: PodSpec::default(),
            volume_spec: VolumeSpec::default(),
            mysql_conf: MysqlConf::new(),
            orchestrator_uri: None,
            orchestrator_topology_secret_name: None,
        }
    }
}

/// Observed state of a MysqlCluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    /// Number of instances currently reporting ready
    #[serde(default)]
    pub ready_nodes: i32,
}

impl MysqlCluster {
    /// Owner reference to set on every resource created for this cluster
    pub fn as_owner_reference(&self) -> OwnerReference {
        OwnerReference {
            api_version: MysqlCluster::api_version(&()).to_string(),
            kind: MysqlCluster::kind(&()).to_string(),
            name: self.name_any(),
            uid: self.metadata.uid.clone().unwrap_or_default(),
            controller: Some(true),
            block_owner_deletion: None,
        }
    }

    /// Ready instance count, zero when no status has been observed yet
    pub fn ready_nodes(&self) -> i32 {
        self.status.as_ref().map(|s| s.ready_nodes).unwrap_or(0)
    }
}
