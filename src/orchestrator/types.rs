//! Data structures returned by the orchestrator API
//!
//! Orchestrator serializes its Go structs as-is, so field names are
//! PascalCase and nullable integers arrive as `{"Int64": n, "Valid": bool}`.

use serde::{Deserialize, Serialize};

/// Identity of a MySQL instance
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceKey {
    pub hostname: String,
    #[serde(default)]
    pub port: i32,
}

/// Nullable integer as encoded by orchestrator
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct NullInt64 {
    #[serde(default)]
    pub int64: i64,
    #[serde(default)]
    pub valid: bool,
}

impl NullInt64 {
    pub fn value(&self) -> Option<i64> {
        self.valid.then_some(self.int64)
    }
}

impl From<Option<i64>> for NullInt64 {
    fn from(value: Option<i64>) -> Self {
        match value {
            Some(int64) => NullInt64 { int64, valid: true },
            None => NullInt64::default(),
        }
    }
}

/// A MySQL instance as seen by orchestrator
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Instance {
    pub key: InstanceKey,

    /// Replication lag in seconds; null when unknown or not replicating
    #[serde(default)]
    pub seconds_behind_master: NullInt64,
}

/// Replicas are reported as plain instances
pub type ReplicaInfo = Instance;

impl Instance {
    pub fn new(hostname: impl Into<String>, port: i32, lag: Option<i64>) -> Self {
        Self {
            key: InstanceKey {
                hostname: hostname.into(),
                port,
            },
            seconds_behind_master: lag.into(),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.key.hostname
    }

    /// Replication lag in seconds, `None` when unmeasured
    pub fn lag_seconds(&self) -> Option<i64> {
        self.seconds_behind_master.value()
    }
}

/// Error envelope orchestrator uses for failed API calls
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ApiResponse {
    pub code: String,
    #[serde(default)]
    pub message: String,
}
