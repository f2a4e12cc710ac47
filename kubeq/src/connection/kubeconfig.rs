use std::sync::Arc;

use kube::config::{KubeConfigOptions, Kubeconfig, KubeconfigError};
use snafu::ResultExt;

use super::{Error, error, loader::KubeconfigLoader};

/// Builds a client configuration from a kubeconfig document.
///
/// The document is obtained from a [`KubeconfigLoader`], parsed, and resolved
/// against its current context unless another context is selected with
/// [`with_context`](Self::with_context).
#[derive(Clone)]
pub struct KubeconfigConnection {
    loader: Arc<dyn KubeconfigLoader>,
    context: Option<String>,
}

impl KubeconfigConnection {
    pub fn new<L>(loader: L) -> Self
    where
        L: KubeconfigLoader + 'static,
    {
        Self { loader: Arc::new(loader), context: None }
    }

    #[must_use]
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn context(&self) -> Option<&str> { self.context.as_deref() }

    /// Loads, parses and resolves the kubeconfig.
    ///
    /// # Errors
    ///
    /// Returns an error naming the stage that failed.
    pub async fn resolve(&self) -> Result<kube::Config, Error> {
        let bytes = self.loader.load().context(error::LoadKubeconfigSnafu)?;
        let kubeconfig = parse_kubeconfig(&bytes)?;

        let options = KubeConfigOptions { context: self.context.clone(), ..KubeConfigOptions::default() };
        match kube::Config::from_custom_kubeconfig(kubeconfig, &options).await {
            Ok(config) => Ok(config),
            // the context resolved but its cluster endpoint is unusable
            Err(source @ KubeconfigError::ParseClusterUrl(_)) => {
                Err(source).context(error::InvalidClusterUrlSnafu)
            }
            Err(source) => Err(source).context(error::ResolveKubeconfigSnafu),
        }
    }
}

/// Parses a kubeconfig document.
///
/// # Errors
///
/// Returns an error if `bytes` is not UTF-8 or not a kubeconfig.
pub fn parse_kubeconfig(bytes: &[u8]) -> Result<Kubeconfig, Error> {
    let text = std::str::from_utf8(bytes).context(error::KubeconfigEncodingSnafu)?;
    Kubeconfig::from_yaml(text).context(error::ParseKubeconfigSnafu)
}
