use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Configuration { source: crate::config::Error },

    #[snafu(display("{source}"))]
    Client { source: kubeq::client::Error },

    #[snafu(display("{source}"))]
    Query { source: kubeq::api::Error },

    #[snafu(display("Failed to serialize output as JSON, error: {source}"))]
    SerializeJson { source: serde_json::Error },

    #[snafu(display("Failed to serialize output as YAML, error: {source}"))]
    SerializeYaml { source: serde_yaml::Error },

    #[snafu(display("Failed to write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Failed to create tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: std::io::Error },
}

impl From<crate::config::Error> for Error {
    fn from(source: crate::config::Error) -> Self { Self::Configuration { source } }
}

impl From<kubeq::client::Error> for Error {
    fn from(source: kubeq::client::Error) -> Self { Self::Client { source } }
}

impl From<kubeq::api::Error> for Error {
    fn from(source: kubeq::api::Error) -> Self { Self::Query { source } }
}
