use snafu::Snafu;

use crate::{pager, transport, validate};

/// Errors returned by the resource query facades.
///
/// Validation failures name the offending argument and are always reported
/// before any request is sent.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("invalid namespace: {source}"))]
    InvalidNamespace { source: validate::Error },

    #[snafu(display("invalid {kind} name: {source}"))]
    InvalidName { kind: &'static str, source: validate::Error },

    #[snafu(display("invalid timeout: {source}"))]
    InvalidTimeout { source: validate::Error },

    #[snafu(display("invalid limit: {source}"))]
    InvalidLimit { source: validate::Error },

    #[snafu(display("invalid label selector: {source}"))]
    InvalidLabelSelector { source: validate::Error },

    #[snafu(display("invalid field selector: {source}"))]
    InvalidFieldSelector { source: validate::Error },

    #[snafu(display("Failed to get {kind} \"{name}\" in {scope}, error: {source}"))]
    Get { kind: &'static str, name: String, scope: String, source: transport::Error },

    #[snafu(display("Failed to list {kind} in {scope}, error: {source}"))]
    List { kind: &'static str, scope: String, source: pager::Error },
}

impl Error {
    /// Returns `true` for errors raised before contacting the API server.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidNamespace { .. }
                | Self::InvalidName { .. }
                | Self::InvalidTimeout { .. }
                | Self::InvalidLimit { .. }
                | Self::InvalidLabelSelector { .. }
                | Self::InvalidFieldSelector { .. }
        )
    }

    /// Returns `true` when a get request named an object that does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Get { source, .. } if source.is_not_found())
    }
}
