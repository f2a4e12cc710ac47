use clap::Args;
use kubeq::K8sClient;

use super::{Error, kind::Kind, output, output::OutputFormat};
use crate::config::Config;

#[derive(Args, Clone)]
pub struct GetCommand {
    #[arg(help = "Kind of resource: pod, service, deployment or namespace.")]
    pub kind: Kind,

    #[arg(help = "Name of the resource.")]
    pub name: String,

    #[arg(
        short,
        long,
        help = "Namespace of the resource. Defaults to `defaultNamespace` from the configuration \
                file. Ignored for namespaces."
    )]
    pub namespace: Option<String>,

    #[arg(short, long = "output", value_enum, default_value_t, help = "Output format.")]
    pub output: OutputFormat,
}

impl GetCommand {
    pub async fn run(self, client: &K8sClient, config: &Config) -> Result<(), Error> {
        let Self { kind, name, namespace, output } = self;
        let namespace = namespace.unwrap_or_else(|| config.default_namespace.clone());

        let rendered = match kind {
            Kind::Pod => output.render_one(&client.pods().get(&namespace, &name).await?)?,
            Kind::Service => output.render_one(&client.services().get(&namespace, &name).await?)?,
            Kind::Deployment => {
                output.render_one(&client.deployments().get(&namespace, &name).await?)?
            }
            Kind::Namespace => output.render_one(&client.namespaces().get(&name).await?)?,
        };

        output::write_stdout(rendered.as_bytes()).await
    }
}
