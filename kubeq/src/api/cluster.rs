use std::{marker::PhantomData, time::Duration};

use snafu::ResultExt;

use super::{Error, ResourceKind, error, list, validate_list_input};
use crate::{
    transport::{Scope, Selector, Transport},
    validate,
};

/// Queries for a cluster scoped resource kind `K`.
///
/// Behaves like [`NamespacedApi`](super::NamespacedApi) without the
/// namespace argument.
pub struct ClusterApi<K, T = kube::Client> {
    transport: T,
    kind: PhantomData<fn() -> K>,
}

impl<K, T> Clone for ClusterApi<K, T>
where
    T: Clone,
{
    fn clone(&self) -> Self { Self { transport: self.transport.clone(), kind: PhantomData } }
}

impl<K, T> ClusterApi<K, T>
where
    K: ResourceKind,
    T: Transport<K>,
{
    pub const fn new(transport: T) -> Self { Self { transport, kind: PhantomData } }

    /// Fetches the object called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] for an empty name and [`Error::Get`]
    /// when the object does not exist or the request fails.
    pub async fn get(&self, name: &str) -> Result<K, Error> {
        validate::required(name).context(error::InvalidNameSnafu { kind: K::SINGULAR })?;

        let scope = Scope::Cluster;
        tracing::debug!(kind = K::SINGULAR, name, "Getting resource");
        self.transport.get(scope, name).await.with_context(|_| error::GetSnafu {
            kind: K::SINGULAR,
            name,
            scope: scope.to_string(),
        })
    }

    /// Lists every object matching `label_selector`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad argument, and [`Error::List`]
    /// when any page fails.
    pub async fn list_by_label(
        &self,
        label_selector: &str,
        timeout: Duration,
        limit: i64,
    ) -> Result<Vec<K>, Error> {
        let limit = validate_list_input(None, timeout, limit)?;
        let selector =
            validate::label_selector(label_selector).context(error::InvalidLabelSelectorSnafu)?;

        list(&self.transport, Scope::Cluster, Selector::Label(selector), timeout, limit).await
    }

    /// Lists every object matching `field_selector`.
    ///
    /// # Errors
    ///
    /// Same as [`list_by_label`](Self::list_by_label).
    pub async fn list_by_field(
        &self,
        field_selector: &str,
        timeout: Duration,
        limit: i64,
    ) -> Result<Vec<K>, Error> {
        let limit = validate_list_input(None, timeout, limit)?;
        let selector =
            validate::field_selector(field_selector).context(error::InvalidFieldSelectorSnafu)?;

        list(&self.transport, Scope::Cluster, Selector::Field(selector), timeout, limit).await
    }
}
