//! Custom Resource Definitions for titanium
//!
//! This module defines the MysqlCluster CRD and its defaulting rules.

pub mod defaults;
mod mysql_cluster;
pub mod types;

#[cfg(test)]
mod tests;

pub use defaults::INNODB_BUFFER_POOL_SIZE;
pub use mysql_cluster::{ClusterSpec, ClusterStatus, MysqlCluster};
pub use types::*;
