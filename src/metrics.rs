use std::{borrow::Cow, collections::BTreeMap};

use kube::{
    Resource,
    api::ObjectMeta,
    core::{ClusterResourceScope, NamespaceResourceScope},
};

const GROUP: &str = "metrics.k8s.io";
const VERSION: &str = "v1beta1";

/// Note about own metrics types.
/// `k8s-openapi` only ships the core API groups, and the `metrics.k8s.io`
/// group served by metrics-server is not among them.
///
/// Implementing `Resource` with a static `DynamicType` lets the ordinary
/// `kube::Api<PodMetrics>` / `kube::Api<NodeMetrics>` list them like any built-in kind.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PodMetrics {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub window: Option<String>,
    #[serde(default)]
    pub containers: Vec<ContainerMetrics>,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ContainerMetrics {
    pub name: String,
    #[serde(default)]
    pub usage: BTreeMap<String, String>,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NodeMetrics {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub window: Option<String>,
    #[serde(default)]
    pub usage: BTreeMap<String, String>,
}

/// Raw `cpu` quantity of a usage map, `"0"` when metrics-server left it out.
pub fn cpu(usage: &BTreeMap<String, String>) -> &str {
    usage.get("cpu").map(String::as_str).unwrap_or("0")
}

/// Raw `memory` quantity of a usage map, `"0"` when metrics-server left it out.
pub fn memory(usage: &BTreeMap<String, String>) -> &str {
    usage.get("memory").map(String::as_str).unwrap_or("0")
}

impl Resource for PodMetrics {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn group(_: &()) -> Cow<'_, str> {
        GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        VERSION.into()
    }

    fn kind(_: &()) -> Cow<'_, str> {
        "PodMetrics".into()
    }

    fn api_version(_: &()) -> Cow<'_, str> {
        format!("{GROUP}/{VERSION}").into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "pods".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl Resource for NodeMetrics {
    type DynamicType = ();
    type Scope = ClusterResourceScope;

    fn group(_: &()) -> Cow<'_, str> {
        GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        VERSION.into()
    }

    fn kind(_: &()) -> Cow<'_, str> {
        "NodeMetrics".into()
    }

    fn api_version(_: &()) -> Cow<'_, str> {
        format!("{GROUP}/{VERSION}").into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "nodes".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
