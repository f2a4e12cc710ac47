use k8s_openapi::api::core::v1::Pod;

use super::TableRow;

impl TableRow for Pod {
    const HEADER: &'static [&'static str] =
        &["NAMESPACE", "NAME", "READY", "STATUS", "RESTARTS", "IP", "NODE"];

    fn row(&self) -> Vec<String> {
        let statuses =
            self.status.as_ref().and_then(|status| status.container_statuses.as_deref()).unwrap_or(&[]);
        let containers = self.spec.as_ref().map_or(0, |spec| spec.containers.len());
        let ready = statuses.iter().filter(|status| status.ready).count();
        let restarts = statuses.iter().map(|status| i64::from(status.restart_count)).sum::<i64>();

        vec![
            self.metadata.namespace.clone().unwrap_or_default(),
            self.metadata.name.clone().unwrap_or_default(),
            format!("{ready}/{containers}"),
            self.status
                .as_ref()
                .and_then(|status| status.phase.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            restarts.to_string(),
            self.status.as_ref().and_then(|status| status.pod_ip.clone()).unwrap_or_default(),
            self.spec.as_ref().and_then(|spec| spec.node_name.clone()).unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{
        api::core::v1::{Container, ContainerStatus, PodSpec, PodStatus},
        apimachinery::pkg::apis::meta::v1::ObjectMeta,
    };

    use super::*;

    #[test]
    fn test_row() {
        let pod = Pod {
            metadata: ObjectMeta {
                name: Some("web-0".to_string()),
                namespace: Some("default".to_string()),
                ..ObjectMeta::default()
            },
            spec: Some(PodSpec {
                containers: vec![
                    Container { name: "web".to_string(), ..Container::default() },
                    Container { name: "sidecar".to_string(), ..Container::default() },
                ],
                node_name: Some("node-1".to_string()),
                ..PodSpec::default()
            }),
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                pod_ip: Some("10.0.0.7".to_string()),
                container_statuses: Some(vec![
                    ContainerStatus {
                        name: "web".to_string(),
                        ready: true,
                        restart_count: 2,
                        ..ContainerStatus::default()
                    },
                    ContainerStatus {
                        name: "sidecar".to_string(),
                        ready: false,
                        restart_count: 1,
                        ..ContainerStatus::default()
                    },
                ]),
                ..PodStatus::default()
            }),
        };

        assert_eq!(pod.row(), vec!["default", "web-0", "1/2", "Running", "3", "10.0.0.7", "node-1"]);
        assert_eq!(Pod::default().row()[3], "Unknown");
    }
}
