//! Ways of obtaining a [`kube::Client`].
//!
//! A [`ConnectionStrategy`] first resolves a [`kube::Config`] and then builds
//! the client from it. Building the client does not contact the API server.

mod error;
mod kubeconfig;
pub mod loader;
mod service_account;

use snafu::ResultExt;

pub use self::{
    error::Error,
    kubeconfig::{KubeconfigConnection, parse_kubeconfig},
    loader::{FileKubeconfigLoader, KubeconfigLoader, StaticKubeconfigLoader},
    service_account::ServiceAccountConnection,
};

#[derive(Clone)]
pub enum ConnectionStrategy {
    /// Credentials from a kubeconfig document.
    Kubeconfig(KubeconfigConnection),

    /// Credentials from the service account of the current pod.
    ServiceAccount(ServiceAccountConnection),
}

impl ConnectionStrategy {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Kubeconfig(_) => "kubeconfig",
            Self::ServiceAccount(_) => "service account",
        }
    }

    /// Resolves the client configuration without building a client.
    ///
    /// # Errors
    ///
    /// Returns an error naming the stage that failed.
    pub async fn resolve(&self) -> Result<kube::Config, Error> {
        match self {
            Self::Kubeconfig(connection) => connection.resolve().await,
            Self::ServiceAccount(connection) => connection.resolve(),
        }
    }

    /// Resolves the configuration and builds a client from it.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error naming the stage that failed.
    pub async fn connect(&self) -> Result<kube::Client, Error> {
        let config = self.resolve().await?;
        let cluster_url = config.cluster_url.to_string();
        let default_namespace = config.default_namespace.clone();

        let client = kube::Client::try_from(config).context(error::ConstructClientSnafu)?;
        tracing::info!(
            strategy = self.name(),
            %cluster_url,
            %default_namespace,
            "Constructed Kubernetes client"
        );
        Ok(client)
    }
}

impl From<KubeconfigConnection> for ConnectionStrategy {
    fn from(connection: KubeconfigConnection) -> Self { Self::Kubeconfig(connection) }
}

impl From<ServiceAccountConnection> for ConnectionStrategy {
    fn from(connection: ServiceAccountConnection) -> Self { Self::ServiceAccount(connection) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{KUBECONFIG, kubeconfig_file};

    #[tokio::test]
    async fn test_connect_with_kubeconfig() {
        let file = kubeconfig_file();
        let strategy =
            ConnectionStrategy::from(KubeconfigConnection::new(FileKubeconfigLoader::new(file.path())));
        assert_eq!(strategy.name(), "kubeconfig");

        let client = strategy.connect().await.unwrap();

        assert_eq!(client.default_namespace(), "team-a");
    }

    #[tokio::test]
    async fn test_connect_reports_failed_stage() {
        let broken = KUBECONFIG.replace("current-context: kubeq-test\n", "");
        let strategy =
            ConnectionStrategy::from(KubeconfigConnection::new(StaticKubeconfigLoader::new(broken)));

        let Err(err) = strategy.connect().await else {
            panic!("a kubeconfig without a current context should not connect");
        };

        assert!(err.to_string().starts_with("Failed to resolve kubeconfig context"), "{err}");
    }

    #[tokio::test]
    async fn test_connect_reports_malformed_endpoint() {
        let broken =
            KUBECONFIG.replace("server: https://kubeq.example.com:6443", "server: not a url");
        let strategy =
            ConnectionStrategy::from(KubeconfigConnection::new(StaticKubeconfigLoader::new(broken)));

        let Err(err) = strategy.connect().await else {
            panic!("a malformed cluster endpoint should not connect");
        };

        assert!(err.to_string().starts_with("Failed to construct Kubernetes client"), "{err}");
    }

    #[test]
    fn test_service_account_name() {
        assert_eq!(ConnectionStrategy::from(ServiceAccountConnection).name(), "service account");
    }
}
