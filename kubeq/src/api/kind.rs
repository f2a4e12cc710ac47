use k8s_openapi::api::{
    apps::v1::Deployment,
    core::v1::{Namespace, Pod, Service},
};

/// Human readable names used in error messages and logs.
pub trait ResourceKind {
    const SINGULAR: &'static str;
    const PLURAL: &'static str;
}

impl ResourceKind for Pod {
    const PLURAL: &'static str = "pods";
    const SINGULAR: &'static str = "pod";
}

impl ResourceKind for Service {
    const PLURAL: &'static str = "services";
    const SINGULAR: &'static str = "service";
}

impl ResourceKind for Deployment {
    const PLURAL: &'static str = "deployments";
    const SINGULAR: &'static str = "deployment";
}

impl ResourceKind for Namespace {
    const PLURAL: &'static str = "namespaces";
    const SINGULAR: &'static str = "namespace";
}
