//! Spec defaulting for MysqlCluster
//!
//! Defaults are applied once when a cluster is created or updated, before any
//! resource is built from it. Every step only fills fields that are unset, so
//! applying the defaults to an already defaulted spec changes nothing.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{ResourceRequirements, VolumeResourceRequirements};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use tracing::debug;

use super::mysql_cluster::{ClusterSpec, MysqlCluster};
use super::types::{PodSpec, VolumeSpec};
use crate::error::Result;
use crate::options::Options;
use crate::quantity::{format_decimal_si, quantity_value};

/// MySQL option derived from the memory request
pub const INNODB_BUFFER_POOL_SIZE: &str = "innodb-buffer-pool-size";
/// Share of the memory request given to the InnoDB buffer pool
const INNODB_BUFFER_SIZE_PERCENT: i64 = 80;

const RESOURCE_REQUEST_CPU: &str = "200m";
const RESOURCE_REQUEST_MEMORY: &str = "1Gi";
const RESOURCE_STORAGE: &str = "8Gi";
const DEFAULT_ACCESS_MODE: &str = "ReadWriteOnce";

impl MysqlCluster {
    /// Apply defaults to the cluster's spec
    pub fn update_defaults(&mut self, opt: &Options) -> Result<()> {
        self.spec.update_defaults(opt)
    }
}

impl ClusterSpec {
    /// Fill every unset field consumed when building the cluster's resources.
    ///
    /// Declared values are validated before anything is written, so on error
    /// the spec is left untouched.
    pub fn update_defaults(&mut self, opt: &Options) -> Result<()> {
        self.pod_spec.memory_request()?;

        if self.mysql_version.is_empty() {
            debug!("Defaulting mysqlVersion to {}", opt.mysql_image_tag);
            self.mysql_version = opt.mysql_image_tag.clone();
        }

        self.pod_spec.update_defaults(opt)?;

        if !self.mysql_conf.contains_key(INNODB_BUFFER_POOL_SIZE) {
            if let Some(mem) = self.pod_spec.memory_request()? {
                // Multiply first so the result truncates like integer percentages do.
                let val = (i128::from(INNODB_BUFFER_SIZE_PERCENT) * i128::from(mem) / 100) as i64;
                let size = format_decimal_si(val);
                debug!("Defaulting {} to {}", INNODB_BUFFER_POOL_SIZE, size);
                self.mysql_conf
                    .insert(INNODB_BUFFER_POOL_SIZE.to_string(), size);
            }
        }

        self.volume_spec.update_defaults()
    }

    /// MySQL image reference: configured repository tagged with the cluster's version
    pub fn mysql_image(&self, opt: &Options) -> String {
        format!("{}:{}", opt.mysql_image, self.mysql_version)
    }

    pub fn titanium_image<'a>(&self, opt: &'a Options) -> &'a str {
        &opt.titanium_image
    }

    pub fn metrics_exporter_image<'a>(&self, opt: &'a Options) -> &'a str {
        &opt.metrics_exporter_image
    }

    /// Orchestrator URI for this cluster: its own when declared, otherwise the
    /// operator-wide one. Empty means no orchestrator.
    pub fn orchestrator_uri<'a>(&'a self, opt: &'a Options) -> &'a str {
        match self.orchestrator_uri.as_deref() {
            Some(uri) if !uri.is_empty() => uri,
            _ => &opt.orchestrator_uri,
        }
    }

    /// Name of the secret holding orchestrator's topology credentials
    pub fn orchestrator_topology_secret<'a>(&'a self, opt: &'a Options) -> &'a str {
        match self.orchestrator_topology_secret_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &opt.orchestrator_topology_secret_name,
        }
    }
}

impl PodSpec {
    /// Default pull policy and resource requests.
    ///
    /// Requests are all-or-nothing: declaring any request, even only CPU,
    /// means no request default is added.
    pub fn update_defaults(&mut self, opt: &Options) -> Result<()> {
        if self.image_pull_policy.is_empty() {
            self.image_pull_policy = opt.image_pull_policy.clone();
        }

        let has_requests = self
            .resources
            .requests
            .as_ref()
            .is_some_and(|r| !r.is_empty());
        if !has_requests {
            debug!(
                "Defaulting pod resource requests to cpu={} memory={}",
                RESOURCE_REQUEST_CPU, RESOURCE_REQUEST_MEMORY
            );
            self.resources = ResourceRequirements {
                requests: Some(BTreeMap::from([
                    ("cpu".to_string(), Quantity(RESOURCE_REQUEST_CPU.to_string())),
                    (
                        "memory".to_string(),
                        Quantity(RESOURCE_REQUEST_MEMORY.to_string()),
                    ),
                ])),
                ..Default::default()
            };
        }

        Ok(())
    }

    /// Requested memory in bytes, if a memory request is declared
    pub fn memory_request(&self) -> Result<Option<i64>> {
        quantity_value(
            self.resources
                .requests
                .as_ref()
                .and_then(|r| r.get("memory")),
        )
    }
}

impl VolumeSpec {
    /// Default access mode and storage request
    pub fn update_defaults(&mut self) -> Result<()> {
        if self.access_modes.is_empty() {
            self.access_modes = vec![DEFAULT_ACCESS_MODE.to_string()];
        }

        let has_requests = self
            .resources
            .requests
            .as_ref()
            .is_some_and(|r| !r.is_empty());
        if !has_requests {
            self.resources = VolumeResourceRequirements {
                requests: Some(BTreeMap::from([(
                    "storage".to_string(),
                    Quantity(RESOURCE_STORAGE.to_string()),
                )])),
                ..Default::default()
            };
        }

        Ok(())
    }
}
