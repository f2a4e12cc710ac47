use std::time::Duration;

use clap::{ArgGroup, Args};
use kubeq::K8sClient;

use super::{Error, kind::Kind, output, output::OutputFormat};
use crate::config::Config;

#[derive(Args, Clone)]
#[command(group(ArgGroup::new("selector").required(true).args(["label_selector", "field_selector"])))]
pub struct ListCommand {
    #[arg(help = "Kind of resource: pod, service, deployment or namespace.")]
    pub kind: Kind,

    #[arg(
        short,
        long,
        help = "Namespace to list from. Defaults to `defaultNamespace` from the configuration \
                file. Ignored for namespaces."
    )]
    pub namespace: Option<String>,

    #[arg(short = 'l', long = "selector", help = "Label selector, e.g. `app=web,tier!=cache`.")]
    pub label_selector: Option<String>,

    #[arg(long = "field-selector", help = "Field selector, e.g. `metadata.name=web`.")]
    pub field_selector: Option<String>,

    #[arg(
        long = "timeout",
        help = "Timeout for each page request in seconds. Defaults to `timeout` from the \
                configuration file."
    )]
    pub timeout: Option<u64>,

    #[arg(
        long = "limit",
        allow_negative_numbers = true,
        help = "Maximum number of objects per page. Defaults to `limit` from the configuration \
                file."
    )]
    pub limit: Option<i64>,

    #[arg(short, long = "output", value_enum, default_value_t, help = "Output format.")]
    pub output: OutputFormat,
}

/// The selector chosen on the command line.
enum Query<'a> {
    Label(&'a str),
    Field(&'a str),
}

impl ListCommand {
    pub async fn run(self, client: &K8sClient, config: &Config) -> Result<(), Error> {
        let Self { kind, namespace, label_selector, field_selector, timeout, limit, output } = self;
        let namespace = namespace.unwrap_or_else(|| config.default_namespace.clone());
        let timeout = timeout.map_or(config.timeout, Duration::from_secs);
        let limit = limit.unwrap_or_else(|| i64::from(config.limit));
        let query = match (&label_selector, &field_selector) {
            (_, Some(selector)) => Query::Field(selector),
            (Some(selector), None) => Query::Label(selector),
            (None, None) => Query::Label(""),
        };

        let rendered = match (kind, query) {
            (Kind::Pod, Query::Label(selector)) => output.render_list(
                &client.pods().list_by_label(&namespace, selector, timeout, limit).await?,
            )?,
            (Kind::Pod, Query::Field(selector)) => output.render_list(
                &client.pods().list_by_field(&namespace, selector, timeout, limit).await?,
            )?,
            (Kind::Service, Query::Label(selector)) => output.render_list(
                &client.services().list_by_label(&namespace, selector, timeout, limit).await?,
            )?,
            (Kind::Service, Query::Field(selector)) => output.render_list(
                &client.services().list_by_field(&namespace, selector, timeout, limit).await?,
            )?,
            (Kind::Deployment, Query::Label(selector)) => output.render_list(
                &client.deployments().list_by_label(&namespace, selector, timeout, limit).await?,
            )?,
            (Kind::Deployment, Query::Field(selector)) => output.render_list(
                &client.deployments().list_by_field(&namespace, selector, timeout, limit).await?,
            )?,
            (Kind::Namespace, Query::Label(selector)) => output
                .render_list(&client.namespaces().list_by_label(selector, timeout, limit).await?)?,
            (Kind::Namespace, Query::Field(selector)) => output
                .render_list(&client.namespaces().list_by_field(selector, timeout, limit).await?)?,
        };

        output::write_stdout(rendered.as_bytes()).await
    }
}
