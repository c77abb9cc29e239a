//! Process-wide options
//!
//! Options are read once at process start (command line first, environment
//! second, built-in defaults last) and shared read-only afterwards. Callers
//! hold them in an [`Arc`] and hand a reference to the defaulting engine and
//! the topology helpers; nothing in this crate looks them up globally.
//!
//! `Options` is a `clap::Args` group: a host binary flattens it into its own
//! parser with `#[command(flatten)]`. [`Options::load`] reads the environment
//! only and never looks at the process arguments.

use std::ffi::OsString;
use std::sync::Arc;

use clap::{Args, Parser};
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_MYSQL_IMAGE: &str = "percona";
pub const DEFAULT_MYSQL_IMAGE_TAG: &str = "5.7";
pub const DEFAULT_TITANIUM_IMAGE: &str = "gcr.io/pl-infra/titanium-toolbox:latest";
pub const DEFAULT_METRICS_EXPORTER_IMAGE: &str = "prom/mysqld-exporter:latest";
pub const DEFAULT_IMAGE_PULL_POLICY: &str = "IfNotPresent";

#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// MySQL image repository, the cluster's version becomes the tag
    #[arg(long, env = "MYSQL_IMAGE", default_value = DEFAULT_MYSQL_IMAGE)]
    pub mysql_image: String,

    /// MySQL image tag used when a cluster does not declare a version
    #[arg(long, env = "MYSQL_IMAGE_TAG", default_value = DEFAULT_MYSQL_IMAGE_TAG)]
    pub mysql_image_tag: String,

    /// Sidecar/toolbox image
    #[arg(long, env = "TITANIUM_IMAGE", default_value = DEFAULT_TITANIUM_IMAGE)]
    pub titanium_image: String,

    /// Prometheus MySQL exporter image
    #[arg(long, env = "METRICS_EXPORTER_IMAGE", default_value = DEFAULT_METRICS_EXPORTER_IMAGE)]
    pub metrics_exporter_image: String,

    /// Image pull policy applied to clusters that do not set one
    #[arg(long, env = "IMAGE_PULL_POLICY", default_value = DEFAULT_IMAGE_PULL_POLICY)]
    pub image_pull_policy: String,

    /// Orchestrator base URI; empty disables orchestrator lookups
    #[arg(long, env = "ORCHESTRATOR_URI", default_value = "")]
    pub orchestrator_uri: String,

    /// Secret holding the credentials orchestrator uses to reach MySQL nodes
    #[arg(long, env = "ORCHESTRATOR_TOPOLOGY_SECRET_NAME", default_value = "")]
    pub orchestrator_topology_secret_name: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mysql_image: DEFAULT_MYSQL_IMAGE.to_string(),
            mysql_image_tag: DEFAULT_MYSQL_IMAGE_TAG.to_string(),
            titanium_image: DEFAULT_TITANIUM_IMAGE.to_string(),
            metrics_exporter_image: DEFAULT_METRICS_EXPORTER_IMAGE.to_string(),
            image_pull_policy: DEFAULT_IMAGE_PULL_POLICY.to_string(),
            orchestrator_uri: String::new(),
            orchestrator_topology_secret_name: String::new(),
        }
    }
}

/// Standalone command line made of the options alone
#[derive(Parser, Debug)]
#[command(name = "titanium", about = "Options for MySQL cluster defaulting and topology")]
struct OptionsCli {
    #[command(flatten)]
    options: Options,
}

impl Options {
    /// Load options from the environment, falling back to built-in defaults
    pub fn load() -> Result<Arc<Self>> {
        Self::load_from(["titanium"])
    }

    /// Load options from an explicit argument list (first item is the binary
    /// name); unset flags still fall back to the environment.
    pub fn load_from<I, T>(args: I) -> Result<Arc<Self>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let opts = OptionsCli::try_parse_from(args)
            .map_err(|e| Error::ConfigError(e.to_string()))?
            .options;
        debug!(
            mysql_image = %opts.mysql_image,
            mysql_image_tag = %opts.mysql_image_tag,
            orchestrator_enabled = !opts.orchestrator_uri.is_empty(),
            "Loaded options"
        );
        Ok(Arc::new(opts))
    }
}
