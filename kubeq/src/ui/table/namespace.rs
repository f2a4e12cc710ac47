use k8s_openapi::api::core::v1::Namespace;

use super::TableRow;

impl TableRow for Namespace {
    const HEADER: &'static [&'static str] = &["NAME", "STATUS"];

    fn row(&self) -> Vec<String> {
        vec![
            self.metadata.name.clone().unwrap_or_default(),
            self.status
                .as_ref()
                .and_then(|status| status.phase.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        ]
    }
}
