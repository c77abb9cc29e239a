//! Titanium: topology resolution and spec defaulting for MySQL clusters
//!
//! This crate provides the MysqlCluster custom resource, the defaults applied
//! to it, the naming convention for its child resources, and the resolver
//! that finds the current master and a healthy read replica, asking
//! orchestrator when one is configured.

pub mod crd;
pub mod error;
pub mod naming;
pub mod options;
pub mod orchestrator;
pub mod quantity;
pub mod telemetry;
pub mod topology;


pub use crate::error::{Error, Result};
pub use crate::naming::{instance_hostname, resource_name, ResourceRole};
pub use crate::options::Options;
pub use crate::topology::TopologyResolver;
