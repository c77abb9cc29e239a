//! Shared types for MySQL cluster specifications
//!
//! Resource requirements reuse the Kubernetes core types so they can be
//! copied straight into the generated StatefulSet and PVC templates.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{ResourceRequirements, VolumeResourceRequirements};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MySQL configuration rendered into `my.cnf`, key → value
pub type MysqlConf = BTreeMap<String, String>;

/// Pod-level settings for the MySQL instance container
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// Image pull policy (Always, IfNotPresent, Never)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_pull_policy: String,

    /// Compute resource requests and limits
    #[serde(default)]
    #[schemars(with = "serde_json::Value")]
    pub resources: ResourceRequirements,
}

/// Persistent volume settings for each instance
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSpec {
    /// Access modes of the claim (e.g. "ReadWriteOnce")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_modes: Vec<String>,

    /// Storage requests and limits
    #[serde(default)]
    #[schemars(with = "serde_json::Value")]
    pub resources: VolumeResourceRequirements,
}
