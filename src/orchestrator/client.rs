//! HTTP client for the orchestrator API
//!
//! One client is built per lookup against the cluster's orchestrator URI.
//! Each call issues exactly one request: no retries and no client-side
//! timeout. Callers that need a bound wrap the call in
//! `tokio::time::timeout`.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{OrchestratorError, Result};
use super::types::{ApiResponse, Instance, ReplicaInfo};

/// Read-only view of an orchestrator
#[async_trait]
pub trait OrchestratorClient: Send + Sync {
    /// Current master of the cluster
    async fn master(&self, cluster: &str) -> Result<Instance>;

    /// Replicas of the cluster in the order orchestrator lists them
    async fn replicas(&self, cluster: &str) -> Result<Vec<ReplicaInfo>>;
}

/// Builds an orchestrator client for a base URI
pub trait ClientFactory: Send + Sync {
    type Client: OrchestratorClient;

    fn connect(&self, uri: &str) -> Result<Self::Client>;
}

/// Factory producing [`HttpOrchestratorClient`]s
#[derive(Clone, Debug, Default)]
pub struct HttpClientFactory;

impl ClientFactory for HttpClientFactory {
    type Client = HttpOrchestratorClient;

    fn connect(&self, uri: &str) -> Result<HttpOrchestratorClient> {
        HttpOrchestratorClient::new(uri)
    }
}

/// Client for the orchestrator HTTP API
#[derive(Clone, Debug)]
pub struct HttpOrchestratorClient {
    http_client: Client,
    base_url: String,
}

impl HttpOrchestratorClient {
    /// Create a client for `uri`.
    ///
    /// Both `http://orc:3000` and `http://orc:3000/api` address the same API.
    pub fn new(uri: &str) -> Result<Self> {
        let base_url = normalize_base_url(uri)?;
        let http_client = Client::builder().build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}/{path}` and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("Querying orchestrator at {}", url);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiResponse>(&body)
                .map(|r| r.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
            return Err(OrchestratorError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        match serde_json::from_slice::<T>(&body) {
            Ok(value) => Ok(value),
            Err(e) => match serde_json::from_slice::<ApiResponse>(&body) {
                Ok(api) if api.code == "ERROR" => Err(OrchestratorError::ApiError(api.message)),
                _ => Err(e.into()),
            },
        }
    }
}

#[async_trait]
impl OrchestratorClient for HttpOrchestratorClient {
    /// Endpoint: GET {base}/master/{cluster}
    async fn master(&self, cluster: &str) -> Result<Instance> {
        self.get(&format!("master/{}", cluster)).await
    }

    /// Endpoint: GET {base}/cluster-osc-slaves/{cluster}
    async fn replicas(&self, cluster: &str) -> Result<Vec<ReplicaInfo>> {
        self.get(&format!("cluster-osc-slaves/{}", cluster)).await
    }
}

fn normalize_base_url(uri: &str) -> Result<String> {
    let invalid = |reason: String| OrchestratorError::InvalidUri {
        uri: uri.to_string(),
        reason,
    };

    let url = Url::parse(uri.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }

    let mut base = url.as_str().trim_end_matches('/').to_string();
    if !base.ends_with("/api") {
        base.push_str("/api");
    }
    Ok(base)
}
