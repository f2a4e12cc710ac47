use k8s_openapi::api::apps::v1::Deployment;

use super::TableRow;

impl TableRow for Deployment {
    const HEADER: &'static [&'static str] =
        &["NAMESPACE", "NAME", "READY", "UP-TO-DATE", "AVAILABLE"];

    fn row(&self) -> Vec<String> {
        let desired = self.spec.as_ref().and_then(|spec| spec.replicas).unwrap_or(1);
        let status = self.status.clone().unwrap_or_default();

        vec![
            self.metadata.namespace.clone().unwrap_or_default(),
            self.metadata.name.clone().unwrap_or_default(),
            format!("{}/{desired}", status.ready_replicas.unwrap_or(0)),
            status.updated_replicas.unwrap_or(0).to_string(),
            status.available_replicas.unwrap_or(0).to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{
        api::apps::v1::{DeploymentSpec, DeploymentStatus},
        apimachinery::pkg::apis::meta::v1::ObjectMeta,
    };

    use super::*;

    #[test]
    fn test_row() {
        let deployment = Deployment {
            metadata: ObjectMeta {
                name: Some("api".to_string()),
                namespace: Some("team-a".to_string()),
                ..ObjectMeta::default()
            },
            spec: Some(DeploymentSpec { replicas: Some(3), ..DeploymentSpec::default() }),
            status: Some(DeploymentStatus {
                ready_replicas: Some(2),
                updated_replicas: Some(3),
                available_replicas: Some(2),
                ..DeploymentStatus::default()
            }),
        };

        assert_eq!(deployment.row(), vec!["team-a", "api", "2/3", "3", "2"]);
    }
}
