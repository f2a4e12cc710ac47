use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu, ensure};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("kubeconfig path is empty"))]
    EmptyPath,

    #[snafu(display("{} does not exist", path.display()))]
    NotFound { path: PathBuf },

    #[snafu(display("{} is not a regular file", path.display()))]
    NotAFile { path: PathBuf },

    #[snafu(display("Failed to inspect {}, error: {source}", path.display()))]
    Inspect { path: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to read {}, error: {source}", path.display()))]
    Read { path: PathBuf, source: std::io::Error },

    #[snafu(display("{message}"))]
    Generic { message: String },
}

/// A source of raw kubeconfig bytes.
pub trait KubeconfigLoader: Send + Sync {
    /// Returns the kubeconfig document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be obtained.
    fn load(&self) -> Result<Vec<u8>, Error>;
}

/// Reads a kubeconfig file from disk.
#[derive(Clone, Debug)]
pub struct FileKubeconfigLoader {
    path: PathBuf,
}

impl FileKubeconfigLoader {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self { Self { path: path.into() } }

    #[must_use]
    pub fn path(&self) -> &Path { &self.path }
}

impl KubeconfigLoader for FileKubeconfigLoader {
    fn load(&self) -> Result<Vec<u8>, Error> {
        let path = &self.path;
        ensure!(!path.as_os_str().is_empty(), EmptyPathSnafu);

        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return NotFoundSnafu { path: path.clone() }.fail();
            }
            Err(source) => return Err(source).context(InspectSnafu { path: path.clone() }),
        };
        ensure!(metadata.is_file(), NotAFileSnafu { path: path.clone() });

        std::fs::read(path).context(ReadSnafu { path: path.clone() })
    }
}

/// Serves a kubeconfig document already held in memory.
#[derive(Clone, Debug)]
pub struct StaticKubeconfigLoader(Vec<u8>);

impl StaticKubeconfigLoader {
    pub fn new<B: Into<Vec<u8>>>(bytes: B) -> Self { Self(bytes.into()) }
}

impl KubeconfigLoader for StaticKubeconfigLoader {
    fn load(&self) -> Result<Vec<u8>, Error> { Ok(self.0.clone()) }
}
