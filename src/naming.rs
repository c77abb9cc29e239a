//! Resource naming convention for MySQL clusters
//!
//! Every child resource of a cluster and every instance hostname is derived
//! from the cluster name alone. All roles currently share one base name,
//! `<cluster>-mysql`; callers must not assume role-distinct names.

use std::collections::BTreeMap;
use std::fmt;

use kube::ResourceExt;

use crate::crd::MysqlCluster;

/// Role of a resource created for a cluster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceRole {
    /// Headless service giving instances stable DNS names
    HeadlessService,
    /// StatefulSet running the MySQL instances
    StatefulSet,
    /// ConfigMap with the MySQL configuration files
    ConfigMap,
    /// Secret exposing environment variables to the instances
    EnvSecret,
    /// CronJob taking scheduled backups
    BackupCronJob,
}

impl ResourceRole {
    pub const ALL: [ResourceRole; 5] = [
        ResourceRole::HeadlessService,
        ResourceRole::StatefulSet,
        ResourceRole::ConfigMap,
        ResourceRole::EnvSecret,
        ResourceRole::BackupCronJob,
    ];

    /// Short alias of the role
    pub fn alias(&self) -> &'static str {
        match self {
            ResourceRole::HeadlessService => "headless",
            ResourceRole::StatefulSet => "mysql",
            ResourceRole::ConfigMap => "config-files",
            ResourceRole::EnvSecret => "env-config",
            ResourceRole::BackupCronJob => "backup-cron",
        }
    }
}

impl fmt::Display for ResourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

/// Name of the resource playing `role` for `cluster_name`.
///
/// The role does not take part in the name.
pub fn resource_name(_role: ResourceRole, cluster_name: &str) -> String {
    format!("{}-mysql", cluster_name)
}

/// Fully qualified hostname of the instance with the given ordinal.
///
/// Format: `<statefulset>-<ordinal>.<headless-service>`
pub fn instance_hostname(cluster_name: &str, ordinal: u32) -> String {
    format!(
        "{}-{}.{}",
        resource_name(ResourceRole::StatefulSet, cluster_name),
        ordinal,
        resource_name(ResourceRole::HeadlessService, cluster_name)
    )
}

/// Get the standard labels for a cluster's child resources
pub fn standard_labels(cluster: &MysqlCluster) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert("app.kubernetes.io/name".to_string(), "mysql".to_string());
    labels.insert("app.kubernetes.io/instance".to_string(), cluster.name_any());
    labels.insert(
        "app.kubernetes.io/managed-by".to_string(),
        "titanium".to_string(),
    );
    labels
}

impl MysqlCluster {
    /// Name of this cluster's resource for `role`
    pub fn name_for_resource(&self, role: ResourceRole) -> String {
        resource_name(role, &self.name_any())
    }

    /// Hostname of this cluster's instance `ordinal`
    pub fn pod_hostname(&self, ordinal: u32) -> String {
        instance_hostname(&self.name_any(), ordinal)
    }
}
