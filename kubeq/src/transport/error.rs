use snafu::Snafu;

/// Failures reported by a [`Transport`](super::Transport).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Kube {
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("{kind} \"{name}\" not found"))]
    NotFound { kind: &'static str, name: String },

    #[snafu(display("{message}"))]
    Generic { message: String },
}

impl Error {
    /// Returns `true` when the API server reported the object as absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Kube { source } => {
                matches!(source.as_ref(), kube::Error::Api(response) if response.code == 404)
            }
            Self::NotFound { .. } => true,
            Self::Generic { .. } => false,
        }
    }
}
