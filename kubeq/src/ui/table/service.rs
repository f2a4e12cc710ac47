use k8s_openapi::api::core::v1::{Service, ServicePort};

use super::TableRow;

impl TableRow for Service {
    const HEADER: &'static [&'static str] =
        &["NAMESPACE", "NAME", "TYPE", "CLUSTER-IP", "EXTERNAL-IP", "PORTS"];

    fn row(&self) -> Vec<String> {
        let spec = self.spec.clone().unwrap_or_default();
        let external_ips = spec.external_ips.unwrap_or_default();
        let ports = spec.ports.unwrap_or_default().iter().map(port).collect::<Vec<_>>();

        vec![
            self.metadata.namespace.clone().unwrap_or_default(),
            self.metadata.name.clone().unwrap_or_default(),
            spec.type_.unwrap_or_else(|| "ClusterIP".to_string()),
            spec.cluster_ip.unwrap_or_else(|| "<none>".to_string()),
            if external_ips.is_empty() { "<none>".to_string() } else { external_ips.join(",") },
            if ports.is_empty() { "<none>".to_string() } else { ports.join(",") },
        ]
    }
}

fn port(port: &ServicePort) -> String {
    let protocol = port.protocol.as_deref().unwrap_or("TCP");
    match port.node_port {
        Some(node_port) => format!("{}:{node_port}/{protocol}", port.port),
        None => format!("{}/{protocol}", port.port),
    }
}
