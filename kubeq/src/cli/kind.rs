use clap::ValueEnum;

/// Resource kinds accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    #[value(aliases = ["pods", "po"])]
    Pod,

    #[value(aliases = ["services", "svc"])]
    Service,

    #[value(aliases = ["deployments", "deploy"])]
    Deployment,

    #[value(aliases = ["namespaces", "ns"])]
    Namespace,
}
