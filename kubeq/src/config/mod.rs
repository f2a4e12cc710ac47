mod error;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use kubeq::{
    ClientOption,
    connection::{FileKubeconfigLoader, KubeconfigConnection},
};
use kubeq_base::consts::{DEFAULT_LIST_TIMEOUT, DEFAULT_PAGE_LIMIT, k8s::DEFAULT_NAMESPACE};
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use snafu::{OptionExt, ResultExt};

pub use self::error::Error;

#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,

    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Per-page list timeout, in seconds.
    #[serde(default = "default_timeout")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub timeout: Duration,

    /// Page size for list calls.
    #[serde(default = "default_limit")]
    pub limit: u32,

    #[serde(default = "kubeq_cli::config::LogConfig::default")]
    pub log: kubeq_cli::config::LogConfig,
}

/// How the binary reaches the cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    /// Kubeconfig file; falls back to `$KUBECONFIG` and `~/.kube/config`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,

    /// Context to use instead of the kubeconfig's current context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Use the service account of the pod `kubeq` runs in.
    #[serde(default)]
    pub in_cluster: bool,
}

impl ConnectionConfig {
    /// Converts the settings into the option that configures the client.
    pub fn client_option(&self) -> Result<ClientOption, Error> {
        if self.in_cluster {
            return Ok(ClientOption::service_account());
        }

        let path = self
            .kubeconfig
            .clone()
            .or_else(kubeq_base::config::default_kubeconfig_path)
            .context(error::NoKubeconfigSnafu)?;
        let mut connection = KubeconfigConnection::new(FileKubeconfigLoader::new(path));
        if let Some(context) = &self.context {
            connection = connection.with_context(context.clone());
        }
        Ok(ClientOption::Strategy(connection.into()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            default_namespace: default_namespace(),
            timeout: default_timeout(),
            limit: default_limit(),
            log: kubeq_cli::config::LogConfig::default(),
        }
    }
}

impl Config {
    /// Returns the first existing config file, or the default location when
    /// none exists.
    pub fn search_config_file_path() -> PathBuf {
        let paths = vec![Self::default_path()]
            .into_iter()
            .chain(kubeq_base::fallback_project_config_directories().into_iter().map(|mut path| {
                path.push(kubeq_base::CLI_CONFIG_NAME);
                path
            }))
            .collect::<Vec<_>>();
        for path in paths {
            let Ok(exists) = path.try_exists() else {
                continue;
            };
            if exists {
                return path;
            }
        }
        Self::default_path()
    }

    #[inline]
    pub fn default_path() -> PathBuf {
        [kubeq_base::PROJECT_CONFIG_DIR.to_path_buf(), PathBuf::from(kubeq_base::CLI_CONFIG_NAME)]
            .into_iter()
            .collect()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let path = resolve(path.as_ref())?;
            let data =
                std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
            serde_yaml::from_slice(&data).context(error::ParseConfigSnafu { filename: path })?
        };

        config.log.file_path = config.log.file_path.as_deref().map(resolve).transpose()?;
        config.connection.kubeconfig =
            config.connection.kubeconfig.as_deref().map(resolve).transpose()?;

        Ok(config)
    }

    /// Loads `path`, or the searched default location. A missing default
    /// file yields the default config; a missing explicit file is an error.
    pub fn load_or_default(path: Option<PathBuf>) -> Result<Self, Error> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let path = Self::search_config_file_path();
        if path.try_exists().unwrap_or(false) { Self::load(path) } else { Ok(Self::default()) }
    }

    /// The default config rendered as YAML.
    pub fn template() -> Result<String, Error> {
        serde_yaml::to_string(&Self::default()).context(error::SerializeConfigSnafu)
    }
}

fn resolve(path: &Path) -> Result<PathBuf, Error> {
    path.try_resolve()
        .map(|path| path.to_path_buf())
        .with_context(|_| error::ResolveFilePathSnafu { file_path: path.to_path_buf() })
}

fn default_namespace() -> String { DEFAULT_NAMESPACE.to_string() }

const fn default_timeout() -> Duration { DEFAULT_LIST_TIMEOUT }

const fn default_limit() -> u32 { DEFAULT_PAGE_LIMIT }
