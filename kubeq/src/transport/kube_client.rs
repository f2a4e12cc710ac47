use std::fmt;

use k8s_openapi::api::{
    apps::v1::Deployment,
    core::v1::{Namespace, Pod, Service},
};
use kube::Api;
use serde::de::DeserializeOwned;
use snafu::ResultExt;

use super::{Error, Page, PageRequest, Scope, Transport, error};

/// Resource kinds that can be addressed through a [`kube::Client`].
pub trait KubeResource: k8s_openapi::Resource + Clone + DeserializeOwned + fmt::Debug {
    /// Builds the typed API handle for `scope`.
    fn api(client: kube::Client, scope: Scope<'_>) -> Api<Self>;
}

impl KubeResource for Pod {
    fn api(client: kube::Client, scope: Scope<'_>) -> Api<Self> {
        match scope {
            Scope::Namespaced(namespace) => Api::namespaced(client, namespace),
            Scope::Cluster => Api::all(client),
        }
    }
}

impl KubeResource for Service {
    fn api(client: kube::Client, scope: Scope<'_>) -> Api<Self> {
        match scope {
            Scope::Namespaced(namespace) => Api::namespaced(client, namespace),
            Scope::Cluster => Api::all(client),
        }
    }
}

impl KubeResource for Deployment {
    fn api(client: kube::Client, scope: Scope<'_>) -> Api<Self> {
        match scope {
            Scope::Namespaced(namespace) => Api::namespaced(client, namespace),
            Scope::Cluster => Api::all(client),
        }
    }
}

impl KubeResource for Namespace {
    // Namespaces are cluster scoped; the scope is ignored.
    fn api(client: kube::Client, _scope: Scope<'_>) -> Api<Self> { Api::all(client) }
}

impl<K> Transport<K> for kube::Client
where
    K: KubeResource,
{
    async fn get(&self, scope: Scope<'_>, name: &str) -> Result<K, Error> {
        match K::api(self.clone(), scope).get(name).await {
            Ok(object) => Ok(object),
            Err(kube::Error::Api(response)) if response.code == 404 => {
                error::NotFoundSnafu { kind: K::KIND, name }.fail()
            }
            Err(err) => Err(err).context(error::KubeSnafu),
        }
    }

    async fn list_page(&self, scope: Scope<'_>, request: &PageRequest) -> Result<Page<K>, Error> {
        K::api(self.clone(), scope)
            .list(&request.to_list_params())
            .await
            .map(Page::from)
            .context(error::KubeSnafu)
    }
}
