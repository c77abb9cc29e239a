//! Topology resolution for MySQL clusters
//!
//! Answers two routing questions for a cluster: which host is the master and
//! which host is a replica fresh enough to read from. Orchestrator is asked
//! when a URI is configured. Whenever it is not configured, unreachable, or
//! has no usable answer, the structural hostname from the naming convention
//! is returned instead. Both operations always produce a hostname.

use kube::ResourceExt;
use tracing::{debug, error, instrument, warn};

use crate::crd::MysqlCluster;
use crate::naming::instance_hostname;
use crate::options::Options;
use crate::orchestrator::{
    ClientFactory, HttpClientFactory, OrchestratorClient, OrchestratorError, ReplicaInfo,
};

/// Maximum replication lag, in seconds, of a replica considered healthy
pub const REPLICA_LAG_THRESHOLD_SECS: i64 = 5;

/// Resolves master and healthy-replica hostnames for clusters
#[derive(Clone, Debug, Default)]
pub struct TopologyResolver<F = HttpClientFactory> {
    factory: F,
}

impl TopologyResolver<HttpClientFactory> {
    /// Resolver talking to orchestrator over HTTP
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: ClientFactory> TopologyResolver<F> {
    pub fn with_factory(factory: F) -> Self {
        Self { factory }
    }

    /// Hostname of the cluster's master.
    ///
    /// Falls back to instance 0 when `orc_uri` is empty or the lookup fails.
    #[instrument(skip(self, orc_uri), fields(orchestrator = !orc_uri.is_empty()))]
    pub async fn resolve_master(&self, cluster_name: &str, orc_uri: &str) -> String {
        let fallback = instance_hostname(cluster_name, 0);
        if orc_uri.is_empty() {
            return fallback;
        }

        match self.query_master(cluster_name, orc_uri).await {
            Ok(host) => {
                debug!("[resolve_master] orchestrator reports master {}", host);
                host
            }
            Err(e) => {
                warn!(
                    "[resolve_master] failed to query orchestrator: {}, falling back to {}",
                    e, fallback
                );
                fallback
            }
        }
    }

    /// Hostname of a replica that is safe to read from.
    ///
    /// The structural answer is the highest ready ordinal. With orchestrator,
    /// the last listed replica lagging at most
    /// [`REPLICA_LAG_THRESHOLD_SECS`] wins.
    #[instrument(skip(self, orc_uri), fields(orchestrator = !orc_uri.is_empty()))]
    pub async fn resolve_healthy_replica(
        &self,
        cluster_name: &str,
        orc_uri: &str,
        ready_nodes: i32,
    ) -> String {
        let fallback = instance_hostname(cluster_name, fallback_replica_ordinal(ready_nodes));
        if orc_uri.is_empty() {
            return fallback;
        }

        debug!("[resolve_healthy_replica] using orchestrator to find a replica");
        let host = match self.query_replicas(cluster_name, orc_uri).await {
            Ok(replicas) => match select_healthy_replica(&replicas) {
                Some(replica) => {
                    debug!(
                        "[resolve_healthy_replica] orchestrator chose {}",
                        replica.hostname()
                    );
                    replica.hostname().to_string()
                }
                None => {
                    warn!(
                        "[resolve_healthy_replica] none of {} replicas is within {}s lag",
                        replicas.len(),
                        REPLICA_LAG_THRESHOLD_SECS
                    );
                    fallback
                }
            },
            Err(e) => {
                error!("[resolve_healthy_replica] orchestrator failed with: {}", e);
                fallback
            }
        };

        debug!("[resolve_healthy_replica] replica host is {}", host);
        host
    }

    async fn query_master(
        &self,
        cluster_name: &str,
        orc_uri: &str,
    ) -> Result<String, OrchestratorError> {
        let client = self.factory.connect(orc_uri)?;
        let master = client.master(cluster_name).await?;
        if master.hostname().is_empty() {
            return Err(OrchestratorError::ParseError(
                "master has an empty hostname".to_string(),
            ));
        }
        Ok(master.key.hostname)
    }

    async fn query_replicas(
        &self,
        cluster_name: &str,
        orc_uri: &str,
    ) -> Result<Vec<ReplicaInfo>, OrchestratorError> {
        let client = self.factory.connect(orc_uri)?;
        client.replicas(cluster_name).await
    }
}

/// Pick the replica to read from.
///
/// A replica is eligible when its lag is known and at most
/// [`REPLICA_LAG_THRESHOLD_SECS`]. Among eligible replicas the last one in
/// listing order is chosen, not the one with the smallest lag.
///
/// Replicas listed without a hostname are never eligible, on top of the lag
/// rule, so resolution cannot return an empty host. `query_master` applies
/// the same guard to the reported master.
pub fn select_healthy_replica(replicas: &[ReplicaInfo]) -> Option<&ReplicaInfo> {
    replicas
        .iter()
        .filter(|r| {
            !r.hostname().is_empty()
                && r.lag_seconds()
                    .is_some_and(|lag| lag <= REPLICA_LAG_THRESHOLD_SECS)
        })
        .last()
}

/// Ordinal of the most recently added ready instance
fn fallback_replica_ordinal(ready_nodes: i32) -> u32 {
    u32::try_from(ready_nodes.saturating_sub(1)).unwrap_or(0)
}

impl MysqlCluster {
    /// Master hostname, using the cluster's or the operator's orchestrator
    pub async fn master_host<F: ClientFactory>(
        &self,
        resolver: &TopologyResolver<F>,
        opt: &Options,
    ) -> String {
        let name = self.name_any();
        resolver
            .resolve_master(&name, self.spec.orchestrator_uri(opt))
            .await
    }

    /// Healthy replica hostname, using the cluster's or the operator's orchestrator
    pub async fn healthy_replica_host<F: ClientFactory>(
        &self,
        resolver: &TopologyResolver<F>,
        opt: &Options,
    ) -> String {
        let name = self.name_any();
        resolver
            .resolve_healthy_replica(&name, self.spec.orchestrator_uri(opt), self.ready_nodes())
            .await
    }
}
