//! The `kubeq` command line interface.
//!
//! ```bash
//! # Show a single pod
//! kubeq get pod web-0 -n production
//!
//! # List every deployment carrying a label, as YAML
//! kubeq list deployments -n production -l app=web -o yaml
//!
//! # List pods by field selector with small pages
//! kubeq list pods --field-selector status.phase=Running --limit 50
//! ```

mod error;
mod get;
mod kind;
mod list;
mod output;

use std::{io::Write, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use kubeq::K8sClient;
use kubeq_base::CLI_PROGRAM_NAME;
use snafu::ResultExt;
use tokio::runtime::Runtime;

pub use self::error::Error;
use self::{get::GetCommand, list::ListCommand};
use crate::config::Config;

#[derive(Parser)]
#[command(
    name = CLI_PROGRAM_NAME,
    author,
    version,
    about = "Kubeq: validated, paginating queries for Kubernetes resources.",
    long_about = "Kubeq looks up Pods, Services, Deployments and Namespaces by name or by \
                  label and field selectors. Arguments are validated before any request is \
                  sent and list results are paged through until the listing is complete.",
    color = clap::ColorChoice::Always
)]
pub struct Cli {
    #[clap(subcommand)]
    commands: Option<Commands>,

    #[clap(
        long = "config",
        short = 'c',
        env = "KUBEQ_CONFIG_FILE_PATH",
        help = "Specify a configuration file. Defaults to ~/.config/kubeq/config.yaml or \
                KUBEQ_CONFIG_FILE_PATH env var."
    )]
    config_file: Option<PathBuf>,

    #[clap(
        long = "log-level",
        env = "KUBEQ_LOG_LEVEL",
        help = "Set the logging level (e.g., info, debug, trace)."
    )]
    log_level: Option<tracing::Level>,

    #[clap(
        long = "kubeconfig",
        global = true,
        conflicts_with = "in_cluster",
        help = "Path to the kubeconfig file. Overrides the configuration file."
    )]
    kubeconfig: Option<PathBuf>,

    #[clap(
        long = "context",
        global = true,
        conflicts_with = "in_cluster",
        help = "Kubeconfig context to use instead of the current context."
    )]
    context: Option<String>,

    #[clap(
        long = "in-cluster",
        global = true,
        help = "Authenticate with the service account of the pod kubeq runs in."
    )]
    in_cluster: bool,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Display client and server version information")]
    Version {
        #[clap(long = "client", help = "If true, shows client version only (no server required).")]
        client: bool,
    },

    #[command(about = "Generate shell completion script for the specified shell (bash, zsh, fish)")]
    Completions { shell: clap_complete::Shell },

    #[command(about = "Output the default configuration in YAML format")]
    DefaultConfig,

    #[command(alias = "g", about = "Get a single resource by name")]
    Get(GetCommand),

    #[command(aliases = ["l", "ls"], about = "List resources matching a label or field selector")]
    List(ListCommand),
}

impl Default for Cli {
    fn default() -> Self { Self::parse() }
}

impl Cli {
    fn load_config(&self) -> Result<Config, Error> {
        let mut config = Config::load_or_default(self.config_file.clone())?;

        if let Some(log_level) = self.log_level {
            config.log.level = log_level;
        }
        if self.in_cluster {
            config.connection.in_cluster = true;
        }
        if let Some(kubeconfig) = &self.kubeconfig {
            config.connection.in_cluster = false;
            config.connection.kubeconfig = Some(kubeconfig.clone());
        }
        if let Some(context) = &self.context {
            config.connection.context = Some(context.clone());
        }

        Ok(config)
    }

    /// Runs the selected command and returns the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded, the client
    /// cannot be configured or the command fails.
    ///
    /// # Panics
    ///
    /// Panics if writing the version, completions or help text to the
    /// terminal fails.
    pub fn run(self) -> Result<i32, Error> {
        let client_version = Self::command().get_version().unwrap_or_default().to_string();
        match self.commands {
            Some(Commands::Version { client }) if client => {
                std::io::stdout()
                    .write_all(format!("Client Version: {client_version}\n").as_bytes())
                    .expect("Failed to write to stdout");
                return Ok(0);
            }
            Some(Commands::Completions { shell }) => {
                let mut app = Self::command();
                let bin_name = app.get_name().to_string();
                clap_complete::generate(shell, &mut app, bin_name, &mut std::io::stdout());
                return Ok(0);
            }
            Some(Commands::DefaultConfig) => {
                std::io::stdout()
                    .write_all(Config::template()?.as_bytes())
                    .expect("Failed to write to stdout");
                return Ok(0);
            }
            None => {
                let help = Self::command().render_long_help().ansi().to_string();
                std::io::stderr().write_all(help.as_bytes()).expect("Failed to write to stderr");
                return Ok(-1);
            }
            _ => {}
        }

        let config = self.load_config()?;
        config.log.registry();
        let option = config.connection.client_option()?;

        let fut = async move {
            let client = K8sClient::new([option]).await?;
            match self.commands {
                Some(Commands::Version { .. }) => {
                    print_version(&client, &client_version).await?;
                }
                Some(Commands::Get(cmd)) => cmd.run(&client, &config).await?,
                Some(Commands::List(cmd)) => cmd.run(&client, &config).await?,
                Some(Commands::Completions { .. } | Commands::DefaultConfig) | None => {}
            }
            Ok::<_, Error>(0)
        };

        Runtime::new().context(error::InitializeTokioRuntimeSnafu)?.block_on(fut)
    }
}

async fn print_version(client: &K8sClient, client_version: &str) -> Result<(), Error> {
    let server_version = client.handle().apiserver_version().await.map_or_else(
        |err| {
            tracing::warn!("Failed to query server version, error: {err}");
            "unknown".to_string()
        },
        |info| format!("{}.{}", info.major, info.minor),
    );
    let info = format!("Client Version: {client_version}\nServer Version: {server_version}\n");
    output::write_stdout(info.as_bytes()).await
}
