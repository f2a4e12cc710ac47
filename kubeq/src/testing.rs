//! In-memory [`Transport`] used by the unit tests.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::{Resource, ResourceExt};
use kubeq_base::consts::k8s::fields;

use crate::transport::{self, Page, PageRequest, Scope, Selector, Transport};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Get { namespace: Option<String>, name: String },
    List { namespace: Option<String>, request: PageRequest },
}

impl Call {
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Get { namespace, .. } | Self::List { namespace, .. } => namespace.as_deref(),
        }
    }
}

/// Serves a fixed set of objects, paging them with offset based continue
/// tokens, and records every call it receives.
#[derive(Clone)]
pub struct StubTransport<K> {
    objects: Arc<Vec<K>>,
    fail_on_call: Option<usize>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl<K> StubTransport<K> {
    pub fn new(objects: Vec<K>) -> Self {
        Self { objects: Arc::new(objects), fail_on_call: None, calls: Arc::default() }
    }

    /// Makes the `call`-th request (1-based) fail.
    pub const fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<Call> { self.calls.lock().expect("lock is never poisoned").clone() }

    pub fn list_requests(&self) -> Vec<PageRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List { request, .. } => Some(request),
                Call::Get { .. } => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> usize {
        let mut calls = self.calls.lock().expect("lock is never poisoned");
        calls.push(call);
        calls.len()
    }

    fn injected_failure(&self, call: usize) -> Result<(), transport::Error> {
        if self.fail_on_call == Some(call) {
            return Err(transport::Error::Generic { message: format!("injected failure on call {call}") });
        }
        Ok(())
    }
}

fn in_scope<K: Resource>(object: &K, scope: Scope<'_>) -> bool {
    match scope {
        Scope::Namespaced(namespace) => object.meta().namespace.as_deref() == Some(namespace),
        Scope::Cluster => true,
    }
}

fn selected<K: Resource>(object: &K, selector: &Selector) -> bool {
    match selector {
        Selector::Label(selector) => selector.matches(object.labels()),
        Selector::Field(selector) => selector.matches(|field| match field {
            fields::METADATA_NAME => object.meta().name.clone(),
            fields::METADATA_NAMESPACE => object.meta().namespace.clone(),
            _ => None,
        }),
    }
}

impl<K> Transport<K> for StubTransport<K>
where
    K: Resource + Clone,
{
    async fn get(&self, scope: Scope<'_>, name: &str) -> Result<K, transport::Error> {
        let call = self.record(Call::Get {
            namespace: scope.namespace().map(ToString::to_string),
            name: name.to_string(),
        });
        self.injected_failure(call)?;

        self.objects
            .iter()
            .find(|object| in_scope(*object, scope) && object.name_any() == name)
            .cloned()
            .ok_or_else(|| transport::Error::NotFound { kind: "object", name: name.to_string() })
    }

    async fn list_page(
        &self,
        scope: Scope<'_>,
        request: &PageRequest,
    ) -> Result<Page<K>, transport::Error> {
        let call = self.record(Call::List {
            namespace: scope.namespace().map(ToString::to_string),
            request: request.clone(),
        });
        self.injected_failure(call)?;

        let matching = self
            .objects
            .iter()
            .filter(|object| in_scope(*object, scope) && selected(*object, &request.selector))
            .collect::<Vec<_>>();
        let offset = request.continue_token.as_deref().map_or(0, |token| token.parse::<usize>().unwrap_or(0));
        let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);
        let end = offset.saturating_add(limit).min(matching.len());
        let items = matching[offset.min(end)..end].iter().map(|object| (*object).clone()).collect();
        let continue_token = (end < matching.len()).then(|| end.to_string());
        Ok(Page { items, continue_token })
    }
}

/// Builds an object of kind `K` carrying only metadata.
pub fn object<K>(name: &str, namespace: Option<&str>, labels: &[(&str, &str)]) -> K
where
    K: Resource + Default,
{
    let mut object = K::default();
    *object.meta_mut() = ObjectMeta {
        name: Some(name.to_string()),
        namespace: namespace.map(ToString::to_string),
        labels: Some(
            labels
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect::<BTreeMap<_, _>>(),
        ),
        ..ObjectMeta::default()
    };
    object
}

/// A kubeconfig pointing at an unreachable cluster. Building a client from it
/// needs no network access.
pub const KUBECONFIG: &str = r"apiVersion: v1
kind: Config
clusters:
  - name: kubeq-test
    cluster:
      server: https://kubeq.example.com:6443
      certificate-authority-data: LS0tLS1CRUdJTiBDRVJUSUZJQ0FURS0tLS0tCk1JSUJoekNDQVMyZ0F3SUJBZ0lVRWhsL1JGdzZGOE5nZXMxZUxYZStBN2U0MUFJd0NnWUlLb1pJemowRUF3SXcKR0RFV01CUUdBMVVFQXd3TmEzVmlaWEV0ZEdWemRDMWpZVEFnRncweU5qRXdNVFl4TURBME16WmFHQTh5TVRJMgpNRGt5TWpFd01EUXpObG93R0RFV01CUUdBMVVFQXd3TmEzVmlaWEV0ZEdWemRDMWpZVEJaTUJNR0J5cUdTTTQ5CkFnRUdDQ3FHU000OUF3RUhBMElBQkV3ZlN3bUNCUGcyR3owK3Z5N2VURDZreE9UalIzbm5TMmR5RmRFSFNJNWUKMTliSzY3cWgySE4vL1RkSUJkN3BvdmUxUHNkdU0rK05ON1ZFMlR0bTd5ZWpVekJSTUIwR0ExVWREZ1FXQkJUYwpRalhMbG5wZVk0UnM3OE80QTJXcm1CUnJZREFmQmdOVkhTTUVHREFXZ0JUY1FqWExsbnBlWTRSczc4TzRBMldyCm1CUnJZREFQQmdOVkhSTUJBZjhFQlRBREFRSC9NQW9HQ0NxR1NNNDlCQU1DQTBnQU1FVUNJUUMzcUtuZXJyVEsKZ2MybVJnUUloS1N2cGtsTUxxdVpxWlZaWDQ3MFRnWGxSZ0lnSzM4YU9vMENqaXdqRmhxQ2Uwa29HV0FVTWN0ZwpmVXJiL2tvdzU2WFJBWUU9Ci0tLS0tRU5EIENFUlRJRklDQVRFLS0tLS0K
contexts:
  - name: kubeq-test
    context:
      cluster: kubeq-test
      user: kubeq-test
      namespace: team-a
  - name: kubeq-other
    context:
      cluster: kubeq-test
      user: kubeq-test
current-context: kubeq-test
users:
  - name: kubeq-test
    user:
      token: kubeq-test-token
";

/// Writes [`KUBECONFIG`] to a temporary file.
pub fn kubeconfig_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temporary kubeconfig");
    std::io::Write::write_all(&mut file, KUBECONFIG.as_bytes()).expect("write temporary kubeconfig");
    file
}
