use snafu::ResultExt;

use super::{Error, error};

/// Discovers the cluster from the service account mounted into the current
/// pod.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServiceAccountConnection;

impl ServiceAccountConnection {
    /// Reads the in-cluster environment and service account files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DiscoverInCluster`] when not running inside a pod or
    /// when the service account files are unreadable.
    pub fn resolve(self) -> Result<kube::Config, Error> {
        kube::Config::incluster().context(error::DiscoverInClusterSnafu)
    }
}
