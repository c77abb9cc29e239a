//! Orchestrator integration
//!
//! Read-only access to an orchestrator service that tracks the live
//! replication topology of MySQL clusters: which instance is the master and
//! how far behind each replica is.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ClientFactory, HttpClientFactory, HttpOrchestratorClient, OrchestratorClient};
pub use error::{OrchestratorError, Result};
pub use types::{Instance, InstanceKey, NullInt64, ReplicaInfo};
