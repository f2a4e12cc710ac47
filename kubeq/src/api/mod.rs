//! Validated, paginating query facades, one per resource kind.
//!
//! [`NamespacedApi`] serves namespaced kinds and [`ClusterApi`] serves
//! cluster scoped ones. Both validate their arguments before touching the
//! transport and drive list calls to completion through
//! [`pager::collect_pages`].

mod cluster;
mod error;
mod kind;
mod namespaced;

use std::time::Duration;

use k8s_openapi::api::{
    apps::v1::Deployment,
    core::v1::{Namespace, Pod, Service},
};
use kubeq_base::consts::MINIMUM_LIST_TIMEOUT;
use snafu::ResultExt;

pub use self::{cluster::ClusterApi, error::Error, kind::ResourceKind, namespaced::NamespacedApi};
use crate::{
    pager,
    transport::{PageRequest, Scope, Selector, Transport},
    validate,
};

pub type PodApi<T = kube::Client> = NamespacedApi<Pod, T>;
pub type ServiceApi<T = kube::Client> = NamespacedApi<Service, T>;
pub type DeploymentApi<T = kube::Client> = NamespacedApi<Deployment, T>;
pub type NamespaceApi<T = kube::Client> = ClusterApi<Namespace, T>;

/// Checks the arguments shared by every list call, in order: namespace,
/// timeout, limit. Returns the page size on success.
fn validate_list_input(
    namespace: Option<&str>,
    timeout: Duration,
    limit: i64,
) -> Result<u32, Error> {
    if let Some(namespace) = namespace {
        validate::required(namespace).context(error::InvalidNamespaceSnafu)?;
    }
    validate::min_duration(timeout, MINIMUM_LIST_TIMEOUT).context(error::InvalidTimeoutSnafu)?;
    validate::positive(limit).context(error::InvalidLimitSnafu)
}

/// Whole seconds sent to the API server; sub-second precision is dropped.
fn timeout_seconds(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_secs()).unwrap_or(u32::MAX)
}

async fn list<K, T>(
    transport: &T,
    scope: Scope<'_>,
    selector: Selector,
    timeout: Duration,
    limit: u32,
) -> Result<Vec<K>, Error>
where
    K: ResourceKind,
    T: Transport<K>,
{
    let request = PageRequest {
        selector,
        limit,
        timeout_seconds: timeout_seconds(timeout),
        continue_token: None,
    };
    tracing::debug!(kind = K::PLURAL, %scope, ?request, "Listing resources");

    let items = pager::collect_pages(request, timeout, move |request| async move {
        transport.list_page(scope, &request).await
    })
    .await
    .with_context(|_| error::ListSnafu { kind: K::PLURAL, scope: scope.to_string() })?;

    tracing::debug!(kind = K::PLURAL, %scope, count = items.len(), "Listed resources");
    Ok(items)
}
