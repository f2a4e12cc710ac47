use std::time::Duration;

pub mod k8s {
    pub const DEFAULT_NAMESPACE: &str = "default";

    pub mod fields {
        pub const METADATA_NAME: &str = "metadata.name";
        pub const METADATA_NAMESPACE: &str = "metadata.namespace";
    }
}

pub const KUBECONFIG_ENV: &str = "KUBECONFIG";
pub const KUBECONFIG_FILE_NAME: &str = "config";

/// Lower bound for the per-page list timeout.
pub const MINIMUM_LIST_TIMEOUT: Duration = Duration::from_secs(1);

pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_LIMIT: u32 = 500;
