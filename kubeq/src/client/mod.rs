//! The composition root: one Kubernetes handle and the query facades built
//! on top of it.

mod error;

use std::path::PathBuf;

use snafu::ResultExt;

pub use self::error::Error;
use crate::{
    api::{DeploymentApi, NamespaceApi, PodApi, ServiceApi},
    connection::{
        ConnectionStrategy, FileKubeconfigLoader, KubeconfigConnection, KubeconfigLoader,
        ServiceAccountConnection,
    },
};

/// One way of configuring a [`K8sClient`].
#[derive(Clone)]
pub enum ClientOption {
    /// Build a handle with a connection strategy.
    Strategy(ConnectionStrategy),

    /// Use an already constructed handle.
    Client(kube::Client),
}

impl ClientOption {
    pub fn kubeconfig<L>(loader: L) -> Self
    where
        L: KubeconfigLoader + 'static,
    {
        Self::Strategy(KubeconfigConnection::new(loader).into())
    }

    pub fn kubeconfig_file<P: Into<PathBuf>>(path: P) -> Self {
        Self::kubeconfig(FileKubeconfigLoader::new(path))
    }

    #[must_use]
    pub const fn service_account() -> Self {
        Self::Strategy(ConnectionStrategy::ServiceAccount(ServiceAccountConnection))
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Strategy(strategy) => strategy.name(),
            Self::Client(_) => "client",
        }
    }
}

impl From<ConnectionStrategy> for ClientOption {
    fn from(strategy: ConnectionStrategy) -> Self { Self::Strategy(strategy) }
}

impl From<kube::Client> for ClientOption {
    fn from(client: kube::Client) -> Self { Self::Client(client) }
}

/// A Kubernetes handle together with a query facade per supported kind.
///
/// All facades share the handle. Cloning is cheap.
#[derive(Clone)]
pub struct K8sClient {
    handle: kube::Client,
    pods: PodApi,
    services: ServiceApi,
    deployments: DeploymentApi,
    namespaces: NamespaceApi,
}

impl From<kube::Client> for K8sClient {
    fn from(handle: kube::Client) -> Self {
        Self {
            pods: PodApi::new(handle.clone()),
            services: ServiceApi::new(handle.clone()),
            deployments: DeploymentApi::new(handle.clone()),
            namespaces: NamespaceApi::new(handle.clone()),
            handle,
        }
    }
}

impl K8sClient {
    /// Applies `options` in order.
    ///
    /// Exactly one option must be given; the first failure is returned and
    /// the remaining options are not attempted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connect`] when a strategy fails,
    /// [`Error::AlreadyConfigured`] for a second option and
    /// [`Error::NotConfigured`] when no option is given.
    pub async fn new<I>(options: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = ClientOption>,
    {
        let mut builder = K8sClientBuilder::new();
        for option in options {
            builder.apply(option).await?;
        }
        builder.build()
    }

    #[must_use]
    pub const fn handle(&self) -> &kube::Client { &self.handle }

    #[must_use]
    pub const fn pods(&self) -> &PodApi { &self.pods }

    #[must_use]
    pub const fn services(&self) -> &ServiceApi { &self.services }

    #[must_use]
    pub const fn deployments(&self) -> &DeploymentApi { &self.deployments }

    #[must_use]
    pub const fn namespaces(&self) -> &NamespaceApi { &self.namespaces }
}

#[derive(Default)]
enum BuilderState {
    #[default]
    Unconfigured,
    Configured {
        option: &'static str,
        client: Box<K8sClient>,
    },
}

/// Configures a [`K8sClient`] one option at a time.
///
/// The first successfully applied option wins; every later option is
/// rejected and leaves the existing configuration in place.
#[derive(Default)]
pub struct K8sClientBuilder {
    state: BuilderState,
}

impl K8sClientBuilder {
    #[must_use]
    pub const fn new() -> Self { Self { state: BuilderState::Unconfigured } }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self.state, BuilderState::Configured { .. })
    }

    /// The client installed so far, if any.
    #[must_use]
    pub fn client(&self) -> Option<&K8sClient> {
        match &self.state {
            BuilderState::Configured { client, .. } => Some(client.as_ref()),
            BuilderState::Unconfigured => None,
        }
    }

    /// Installs the handle produced by `option`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyConfigured`] without evaluating `option` when
    /// a handle is already installed, and [`Error::Connect`] when the
    /// strategy fails. The builder is unchanged on error.
    pub async fn apply(&mut self, option: ClientOption) -> Result<(), Error> {
        let rejected = option.name();
        if let BuilderState::Configured { option: configured, .. } = self.state {
            tracing::warn!(configured, rejected, "Kubernetes client already configured");
            return error::AlreadyConfiguredSnafu { configured, rejected }.fail();
        }

        let handle = match option {
            ClientOption::Strategy(strategy) => {
                strategy.connect().await.context(error::ConnectSnafu { strategy: rejected })?
            }
            ClientOption::Client(handle) => handle,
        };
        let client = Box::new(K8sClient::from(handle));
        self.state = BuilderState::Configured { option: rejected, client };
        Ok(())
    }

    /// Returns the configured client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] when no option has been applied.
    pub fn build(self) -> Result<K8sClient, Error> {
        match self.state {
            BuilderState::Configured { client, .. } => Ok(*client),
            BuilderState::Unconfigured => error::NotConfiguredSnafu.fail(),
        }
    }
}
