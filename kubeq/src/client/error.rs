use snafu::Snafu;

use crate::connection;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(
        "Kubernetes client already configured by the {configured} option, the {rejected} option \
         was rejected"
    ))]
    AlreadyConfigured { configured: &'static str, rejected: &'static str },

    #[snafu(display("Kubernetes client is not configured"))]
    NotConfigured,

    #[snafu(display("{source} ({strategy} strategy)"))]
    Connect { strategy: &'static str, source: connection::Error },
}
