use std::{marker::PhantomData, time::Duration};

use snafu::ResultExt;

use super::{Error, ResourceKind, error, list, validate_list_input};
use crate::{
    transport::{Scope, Selector, Transport},
    validate,
};

/// Queries for a namespaced resource kind `K`.
///
/// Arguments are validated in declaration order and nothing is sent to the
/// API server when any of them is rejected. List calls follow continue tokens
/// until the listing is exhausted and return every matching object.
pub struct NamespacedApi<K, T = kube::Client> {
    transport: T,
    kind: PhantomData<fn() -> K>,
}

impl<K, T> Clone for NamespacedApi<K, T>
where
    T: Clone,
{
    fn clone(&self) -> Self { Self { transport: self.transport.clone(), kind: PhantomData } }
}

impl<K, T> NamespacedApi<K, T>
where
    K: ResourceKind,
    T: Transport<K>,
{
    pub const fn new(transport: T) -> Self { Self { transport, kind: PhantomData } }

    /// Fetches the object called `name` in `namespace`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty namespace or name, and
    /// [`Error::Get`] when the object does not exist or the request fails.
    pub async fn get(&self, namespace: &str, name: &str) -> Result<K, Error> {
        validate::required(namespace).context(error::InvalidNamespaceSnafu)?;
        validate::required(name).context(error::InvalidNameSnafu { kind: K::SINGULAR })?;

        let scope = Scope::Namespaced(namespace);
        tracing::debug!(kind = K::SINGULAR, %scope, name, "Getting resource");
        self.transport.get(scope, name).await.with_context(|_| error::GetSnafu {
            kind: K::SINGULAR,
            name,
            scope: scope.to_string(),
        })
    }

    /// Lists every object in `namespace` matching `label_selector`.
    ///
    /// `timeout` bounds each page request and must be at least one second;
    /// `limit` is the page size.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad argument, and [`Error::List`]
    /// when any page fails. Partial results are never returned.
    pub async fn list_by_label(
        &self,
        namespace: &str,
        label_selector: &str,
        timeout: Duration,
        limit: i64,
    ) -> Result<Vec<K>, Error> {
        let limit = validate_list_input(Some(namespace), timeout, limit)?;
        let selector =
            validate::label_selector(label_selector).context(error::InvalidLabelSelectorSnafu)?;

        list(&self.transport, Scope::Namespaced(namespace), Selector::Label(selector), timeout, limit)
            .await
    }

    /// Lists every object in `namespace` matching `field_selector`.
    ///
    /// # Errors
    ///
    /// Same as [`list_by_label`](Self::list_by_label).
    pub async fn list_by_field(
        &self,
        namespace: &str,
        field_selector: &str,
        timeout: Duration,
        limit: i64,
    ) -> Result<Vec<K>, Error> {
        let limit = validate_list_input(Some(namespace), timeout, limit)?;
        let selector =
            validate::field_selector(field_selector).context(error::InvalidFieldSelectorSnafu)?;

        list(&self.transport, Scope::Namespaced(namespace), Selector::Field(selector), timeout, limit)
            .await
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::{
        apps::v1::Deployment,
        core::v1::{Pod, Service},
    };
    use kube::ResourceExt;

    use super::*;
    use crate::{
        pager,
        testing::{Call, StubTransport, object},
        transport,
    };

    const TIMEOUT: Duration = Duration::from_secs(1);

    fn pods() -> Vec<Pod> {
        vec![
            object("web-1", Some("default"), &[("app", "test-app")]),
            object("other", Some("default"), &[("app", "other")]),
            object("web-2", Some("default"), &[("app", "test-app")]),
            object("web-3", Some("kube-system"), &[("app", "test-app")]),
        ]
    }

    fn names<K: ResourceExt>(objects: &[K]) -> Vec<String> {
        objects.iter().map(ResourceExt::name_any).collect()
    }

    #[tokio::test]
    async fn test_list_by_label_returns_matching_objects_in_namespace() {
        let transport = StubTransport::new(pods());
        let api = NamespacedApi::<Pod, _>::new(transport.clone());

        let items = api.list_by_label("default", "app=test-app", TIMEOUT, 10).await.unwrap();

        assert_eq!(names(&items), vec!["web-1", "web-2"]);
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].namespace(), Some("default"));
        let requests = transport.list_requests();
        assert_eq!(requests[0].limit, 10);
        assert_eq!(requests[0].timeout_seconds, 1);
        assert_eq!(requests[0].continue_token, None);
    }

    #[tokio::test]
    async fn test_list_follows_continue_tokens() {
        let services = (1..=5)
            .map(|index| object(&format!("svc-{index}"), Some("default"), &[("tier", "backend")]))
            .collect::<Vec<Service>>();
        let transport = StubTransport::new(services);
        let api = NamespacedApi::<Service, _>::new(transport.clone());

        let items = api.list_by_label("default", "tier=backend", TIMEOUT, 2).await.unwrap();

        assert_eq!(names(&items), vec!["svc-1", "svc-2", "svc-3", "svc-4", "svc-5"]);
        let tokens = transport
            .list_requests()
            .into_iter()
            .map(|request| request.continue_token)
            .collect::<Vec<_>>();
        assert_eq!(tokens, vec![None, Some("2".to_string()), Some("4".to_string())]);
    }

    #[tokio::test]
    async fn test_list_with_no_matches_issues_one_call() {
        let transport = StubTransport::new(pods());
        let api = NamespacedApi::<Pod, _>::new(transport.clone());

        let items = api.list_by_label("default", "app=missing", TIMEOUT, 2).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_list_failure_discards_received_pages() {
        let deployments = (1..=5)
            .map(|index| object(&format!("deploy-{index}"), Some("default"), &[("app", "api")]))
            .collect::<Vec<Deployment>>();
        let transport = StubTransport::new(deployments).failing_on_call(2);
        let api = NamespacedApi::<Deployment, _>::new(transport.clone());

        let err = api.list_by_label("default", "app=api", TIMEOUT, 2).await.unwrap_err();

        assert!(!err.is_validation());
        assert!(matches!(
            &err,
            Error::List { kind: "deployments", source: pager::Error::Fetch { page: 2, .. }, .. }
        ));
        assert!(err.to_string().contains("injected failure on call 2"), "{err}");
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_list_is_repeatable() {
        let transport = StubTransport::new(pods());
        let api = NamespacedApi::<Pod, _>::new(transport);

        let first = api.list_by_label("default", "app=test-app", TIMEOUT, 1).await.unwrap();
        let second = api.list_by_label("default", "app=test-app", TIMEOUT, 1).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_arguments_never_reach_transport() {
        let transport = StubTransport::new(pods());
        let api = NamespacedApi::<Pod, _>::new(transport.clone());
        let short = Duration::from_millis(2);

        let cases = [
            ("", "", short, 0, "invalid namespace"),
            ("default", "", short, 0, "invalid timeout"),
            ("default", "", TIMEOUT, 0, "invalid limit"),
            ("default", "", TIMEOUT, -5, "invalid limit"),
            ("default", "", TIMEOUT, 1, "invalid label selector"),
            ("default", "app in (", TIMEOUT, 1, "invalid label selector"),
        ];
        for (namespace, selector, timeout, limit, expected) in cases {
            let err = api.list_by_label(namespace, selector, timeout, limit).await.unwrap_err();
            assert!(err.is_validation());
            assert!(err.to_string().starts_with(expected), "expected '{expected}' in '{err}'");
        }

        let err = api.list_by_field("default", "", TIMEOUT, 1).await.unwrap_err();
        assert!(err.to_string().starts_with("invalid field selector"), "{err}");

        let err = api.get("", "").await.unwrap_err();
        assert!(err.to_string().starts_with("invalid namespace"), "{err}");
        let err = api.get("default", "").await.unwrap_err();
        assert!(err.to_string().starts_with("invalid pod name"), "{err}");

        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sub_second_timeout_is_truncated() {
        let transport = StubTransport::new(pods());
        let api = NamespacedApi::<Pod, _>::new(transport.clone());

        let _items = api
            .list_by_label("default", "app=test-app", Duration::from_millis(1500), 5)
            .await
            .unwrap();

        assert_eq!(transport.list_requests()[0].timeout_seconds, 1);
    }

    #[tokio::test]
    async fn test_list_by_field() {
        let transport = StubTransport::new(pods());
        let api = NamespacedApi::<Pod, _>::new(transport.clone());

        let items = api.list_by_field("default", "metadata.name=web-2", TIMEOUT, 5).await.unwrap();
        assert_eq!(names(&items), vec!["web-2"]);

        let items = api.list_by_field("default", "metadata.name!=web-2", TIMEOUT, 1).await.unwrap();
        assert_eq!(names(&items), vec!["web-1", "other"]);

        let requests = transport.list_requests();
        assert!(matches!(
            &requests[0].selector,
            Selector::Field(selector) if selector.as_str() == "metadata.name=web-2"
        ));
    }

    #[tokio::test]
    async fn test_get() {
        let transport = StubTransport::new(pods());
        let api = NamespacedApi::<Pod, _>::new(transport.clone());

        let pod = api.get("default", "web-1").await.unwrap();
        assert_eq!(pod.name_any(), "web-1");
        assert_eq!(pod.namespace().as_deref(), Some("default"));

        let err = api.get("default", "web-3").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(&err, Error::Get { source: transport::Error::NotFound { .. }, .. }));
        assert!(err.to_string().starts_with("Failed to get pod \"web-3\" in namespace \"default\""));

        assert!(matches!(
            &transport.calls()[0],
            Call::Get { name, .. } if name == "web-1"
        ));
    }

    #[tokio::test]
    async fn test_concurrent_queries() {
        let transport = StubTransport::new(pods());
        let api = NamespacedApi::<Pod, _>::new(transport.clone());

        let results = futures::future::join_all(
            (0..4).map(|_| api.list_by_label("default", "app=test-app", TIMEOUT, 1)),
        )
        .await;

        for result in results {
            assert_eq!(names(&result.unwrap()), vec!["web-1", "web-2"]);
        }
        assert_eq!(transport.calls().len(), 8);
    }
}
