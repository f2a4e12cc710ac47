//! Validated, paginating queries for Pods, Services, Deployments and
//! Namespaces.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::time::Duration;
//!
//! use kubeq::{ClientOption, K8sClient};
//!
//! let client = K8sClient::new([ClientOption::kubeconfig_file("/home/user/.kube/config")]).await?;
//! let pods =
//!     client.pods().list_by_label("default", "app=web", Duration::from_secs(30), 500).await?;
//! println!("{} pods", pods.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod connection;
pub mod pager;
pub mod selector;
pub mod transport;
pub mod validate;

#[cfg(test)]
mod testing;

pub use self::{
    api::{ClusterApi, DeploymentApi, NamespaceApi, NamespacedApi, PodApi, ServiceApi},
    client::{ClientOption, K8sClient, K8sClientBuilder},
    connection::{ConnectionStrategy, KubeconfigLoader},
};
