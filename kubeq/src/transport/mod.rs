//! The seam between the query facades and the Kubernetes API.
//!
//! A [`Transport`] fetches a single object or a single page of a list. It is
//! implemented for [`kube::Client`]; anything else that can answer the same
//! two questions (an in-memory fixture, a recording proxy) can stand in for
//! it.

pub mod error;
mod kube_client;

use std::fmt;

use kube::api::{ListParams, ObjectList};

pub use self::{error::Error, kube_client::KubeResource};
use crate::selector::{FieldSelector, LabelSelector};

/// Where a request is addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope<'a> {
    Namespaced(&'a str),
    Cluster,
}

impl Scope<'_> {
    #[must_use]
    pub const fn namespace(&self) -> Option<&str> {
        match self {
            Self::Namespaced(namespace) => Some(namespace),
            Self::Cluster => None,
        }
    }
}

impl fmt::Display for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespaced(namespace) => write!(f, "namespace \"{namespace}\""),
            Self::Cluster => f.write_str("cluster scope"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Label(LabelSelector),
    Field(FieldSelector),
}

/// Parameters of one list call.
///
/// Only `continue_token` changes from one page to the next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub selector: Selector,

    /// Maximum number of objects per page.
    pub limit: u32,

    /// Server side timeout for this call.
    pub timeout_seconds: u32,

    pub continue_token: Option<String>,
}

impl PageRequest {
    #[must_use]
    pub fn to_list_params(&self) -> ListParams {
        let (label_selector, field_selector) = match &self.selector {
            Selector::Label(selector) => (Some(selector.to_string()), None),
            Selector::Field(selector) => (None, Some(selector.to_string())),
        };
        ListParams {
            label_selector,
            field_selector,
            timeout: Some(self.timeout_seconds),
            limit: Some(self.limit),
            continue_token: self.continue_token.clone(),
            ..ListParams::default()
        }
    }
}

/// One page of a list response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<K> {
    pub items: Vec<K>,

    /// Token for the next page; `None` once the listing is exhausted.
    pub continue_token: Option<String>,
}

impl<K> From<ObjectList<K>> for Page<K>
where
    K: Clone,
{
    fn from(list: ObjectList<K>) -> Self {
        let continue_token = list.metadata.continue_.filter(|token| !token.is_empty());
        Self { items: list.items, continue_token }
    }
}

/// Get-by-name and list-one-page access to resources of kind `K`.
pub trait Transport<K> {
    /// Fetches a single object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or the request fails.
    async fn get(&self, scope: Scope<'_>, name: &str) -> Result<K, Error>;

    /// Fetches one page of objects matching `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(&self, scope: Scope<'_>, request: &PageRequest) -> Result<Page<K>, Error>;
}
