use snafu::Snafu;

use super::loader;

/// Failures while turning a connection strategy into a client. Each variant
/// names the stage that failed.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to load kubeconfig, error: {source}"))]
    LoadKubeconfig { source: loader::Error },

    #[snafu(display("Failed to parse kubeconfig, error: {source}"))]
    KubeconfigEncoding { source: std::str::Utf8Error },

    #[snafu(display("Failed to parse kubeconfig, error: {source}"))]
    ParseKubeconfig {
        #[snafu(source(from(kube::config::KubeconfigError, Box::new)))]
        source: Box<kube::config::KubeconfigError>,
    },

    #[snafu(display("Failed to resolve kubeconfig context, error: {source}"))]
    ResolveKubeconfig {
        #[snafu(source(from(kube::config::KubeconfigError, Box::new)))]
        source: Box<kube::config::KubeconfigError>,
    },

    #[snafu(display("Failed to discover in-cluster service account configuration, error: {source}"))]
    DiscoverInCluster {
        #[snafu(source(from(kube::config::InClusterError, Box::new)))]
        source: Box<kube::config::InClusterError>,
    },

    #[snafu(display("Failed to construct Kubernetes client, error: {source}"))]
    InvalidClusterUrl {
        #[snafu(source(from(kube::config::KubeconfigError, Box::new)))]
        source: Box<kube::config::KubeconfigError>,
    },

    #[snafu(display("Failed to construct Kubernetes client, error: {source}"))]
    ConstructClient {
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },
}
