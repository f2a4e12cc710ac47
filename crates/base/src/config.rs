use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::consts::{KUBECONFIG_ENV, KUBECONFIG_FILE_NAME};

/// Returns the kubeconfig path `kubectl` would pick by default.
///
/// The first entry of `$KUBECONFIG` wins, otherwise `~/.kube/config`.
/// Returns `None` when neither can be determined.
#[must_use]
pub fn default_kubeconfig_path() -> Option<PathBuf> {
    if let Some(paths) = std::env::var_os(KUBECONFIG_ENV)
        && let Some(first) = std::env::split_paths(&paths).find(|path| !path.as_os_str().is_empty())
    {
        return Some(first);
    }

    BaseDirs::new().map(|base_dirs| {
        [base_dirs.home_dir(), Path::new(".kube"), Path::new(KUBECONFIG_FILE_NAME)]
            .iter()
            .collect()
    })
}
