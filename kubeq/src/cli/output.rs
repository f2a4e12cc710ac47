use clap::ValueEnum;
use serde::Serialize;
use snafu::ResultExt;
use tokio::io::AsyncWriteExt;

use super::{Error, error};
use crate::ui::table::{ResourceListExt, TableRow};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render_one<K>(self, object: &K) -> Result<String, Error>
    where
        K: Serialize + TableRow,
    {
        match self {
            Self::Table => Ok(std::slice::from_ref(object).render_table()),
            Self::Json => serde_json::to_string_pretty(object).context(error::SerializeJsonSnafu),
            Self::Yaml => serde_yaml::to_string(object).context(error::SerializeYamlSnafu),
        }
    }

    pub fn render_list<K>(self, objects: &[K]) -> Result<String, Error>
    where
        K: Serialize + TableRow,
    {
        match self {
            Self::Table => Ok(objects.render_table()),
            Self::Json => serde_json::to_string_pretty(objects).context(error::SerializeJsonSnafu),
            Self::Yaml => serde_yaml::to_string(objects).context(error::SerializeYamlSnafu),
        }
    }
}

pub async fn write_stdout(bytes: &[u8]) -> Result<(), Error> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(bytes).await.context(error::WriteStdoutSnafu)?;
    if !bytes.ends_with(b"\n") {
        stdout.write_u8(b'\n').await.context(error::WriteStdoutSnafu)?;
    }
    stdout.flush().await.context(error::WriteStdoutSnafu)
}
