use futures::{FutureExt, future::BoxFuture};
use k8s_openapi::api::{
    apps::v1::{Deployment, StatefulSet},
    core::v1::{Container, Namespace, Node, Pod, PodTemplateSpec, Service},
};
use kube::{Client, api::ListParams};
use tracing::debug;

use super::{Outcome, ResourceApi, object_name};
use crate::{error::Result, format::ResourceRecord, params::CommandParams};

const ROLE_LABEL_PREFIX: &str = "node-role.kubernetes.io/";

/// Conversion of a listed object into a display record.
pub trait Listable: ResourceApi {
    fn to_record(&self, wide: bool) -> ResourceRecord;
}

/// List `K` in the command's namespace, keeping only the named object if one was given.
pub async fn list<K: Listable>(
    client: &Client,
    params: &CommandParams,
) -> Result<Vec<ResourceRecord>> {
    debug!(kind = %K::KIND, namespace = %params.namespace, name = ?params.name, "get");
    let objects = K::api(client.clone(), &params.namespace)
        .list(&ListParams::default())
        .await?;
    let wide = params.is_wide();
    Ok(objects
        .items
        .iter()
        .map(|object| object.to_record(wide))
        .filter(|record| params.name_matches(&record.name))
        .collect())
}

pub fn boxed<'a, K: Listable>(
    client: &'a Client,
    params: &'a CommandParams,
) -> BoxFuture<'a, Result<Outcome>> {
    async move {
        list::<K>(client, params)
            .await
            .map(|records| Outcome::Records {
                kind: K::KIND.to_string(),
                records,
            })
    }
    .boxed()
}

impl Listable for Pod {
    fn to_record(&self, wide: bool) -> ResourceRecord {
        let status = self.status.as_ref();
        let containers = status
            .and_then(|status| status.container_statuses.as_deref())
            .unwrap_or_default();
        let ready = containers.iter().filter(|c| c.ready).count();
        let restarts: i64 = containers.iter().map(|c| i64::from(c.restart_count)).sum();

        let mut record = ResourceRecord::new(object_name(self))
            .field("ready", format!("{ready}/{}", containers.len()))
            .field(
                "status",
                status
                    .and_then(|status| status.phase.as_deref())
                    .unwrap_or_default(),
            )
            .field("restart", restarts);
        if wide {
            record.push(
                "ip",
                status
                    .and_then(|status| status.pod_ip.as_deref())
                    .unwrap_or_default(),
            );
            record.push(
                "node",
                self.spec
                    .as_ref()
                    .and_then(|spec| spec.node_name.as_deref())
                    .unwrap_or_default(),
            );
        }
        record
    }
}

impl Listable for Service {
    fn to_record(&self, wide: bool) -> ResourceRecord {
        let spec = self.spec.as_ref();
        let ports = spec
            .and_then(|spec| spec.ports.as_deref())
            .unwrap_or_default()
            .iter()
            .map(|port| {
                let node_port = port
                    .node_port
                    .map(|node_port| format!(":{node_port}"))
                    .unwrap_or_default();
                let protocol = port.protocol.as_deref().unwrap_or("TCP");
                format!("{}{node_port}/{protocol}", port.port)
            })
            .collect::<Vec<_>>()
            .join(",");

        let mut record = ResourceRecord::new(object_name(self))
            .field(
                "type",
                spec.and_then(|spec| spec.type_.as_deref())
                    .unwrap_or_default(),
            )
            .field(
                "clusterIp",
                spec.and_then(|spec| spec.cluster_ip.as_deref())
                    .unwrap_or_default(),
            )
            .field("ports", ports);
        if wide {
            let selector = spec
                .and_then(|spec| spec.selector.as_ref())
                .filter(|selector| !selector.is_empty())
                .map(|selector| {
                    selector
                        .iter()
                        .map(|(key, value)| format!("{key}={value}"))
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .unwrap_or_else(|| String::from("<none>"));
            record.push("selector", selector);
        }
        record
    }
}

fn template_containers(template: &PodTemplateSpec) -> &[Container] {
    template
        .spec
        .as_ref()
        .map(|spec| spec.containers.as_slice())
        .unwrap_or_default()
}

fn join_containers(containers: &[Container], field: fn(&Container) -> &str) -> String {
    containers.iter().map(field).collect::<Vec<_>>().join(",")
}

fn container_name(container: &Container) -> &str {
    &container.name
}

fn container_image(container: &Container) -> &str {
    container.image.as_deref().unwrap_or_default()
}

impl Listable for Deployment {
    fn to_record(&self, wide: bool) -> ResourceRecord {
        let status = self.status.as_ref();
        let ready = status.and_then(|s| s.ready_replicas).unwrap_or(0);
        let desired = self
            .spec
            .as_ref()
            .and_then(|spec| spec.replicas)
            .or_else(|| status.and_then(|s| s.replicas))
            .unwrap_or(0);

        let mut record = ResourceRecord::new(object_name(self))
            .field("ready", format!("{ready}/{desired}"))
            .field(
                "upToDate",
                status.and_then(|s| s.updated_replicas).unwrap_or(0),
            )
            .field(
                "available",
                status.and_then(|s| s.available_replicas).unwrap_or(0),
            );
        if wide {
            let containers = self
                .spec
                .as_ref()
                .map(|spec| template_containers(&spec.template))
                .unwrap_or_default();
            record.push("images", join_containers(containers, container_image));
            record.push("containers", join_containers(containers, container_name));
        }
        record
    }
}

impl Listable for StatefulSet {
    fn to_record(&self, wide: bool) -> ResourceRecord {
        let status = self.status.as_ref();
        let ready = status.and_then(|s| s.ready_replicas).unwrap_or(0);
        let desired = self
            .spec
            .as_ref()
            .and_then(|spec| spec.replicas)
            .or(status.map(|s| s.replicas))
            .unwrap_or(0);

        let mut record =
            ResourceRecord::new(object_name(self)).field("ready", format!("{ready}/{desired}"));
        if wide {
            let containers = self
                .spec
                .as_ref()
                .map(|spec| template_containers(&spec.template))
                .unwrap_or_default();
            record.push("containers", join_containers(containers, container_name));
            record.push("images", join_containers(containers, container_image));
        }
        record
    }
}

impl Listable for Namespace {
    fn to_record(&self, _wide: bool) -> ResourceRecord {
        ResourceRecord::new(object_name(self)).field(
            "status",
            self.status
                .as_ref()
                .and_then(|status| status.phase.as_deref())
                .unwrap_or_default(),
        )
    }
}

impl Listable for Node {
    fn to_record(&self, wide: bool) -> ResourceRecord {
        let status = self.status.as_ref();
        let conditions = status
            .and_then(|status| status.conditions.as_deref())
            .unwrap_or_default()
            .iter()
            .filter(|condition| condition.status == "True")
            .map(|condition| condition.type_.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let roles = self
            .metadata
            .labels
            .iter()
            .flatten()
            .filter_map(|(key, _)| key.strip_prefix(ROLE_LABEL_PREFIX))
            .collect::<Vec<_>>()
            .join(",");
        let info = status.and_then(|status| status.node_info.as_ref());

        let mut record = ResourceRecord::new(object_name(self))
            .field("status", conditions)
            .field("roles", roles)
            .field(
                "version",
                info.map(|info| info.kubelet_version.as_str())
                    .unwrap_or_default(),
            );
        if wide {
            let internal_ip = status
                .and_then(|status| status.addresses.as_deref())
                .unwrap_or_default()
                .iter()
                .filter(|address| address.type_ == "InternalIP")
                .map(|address| address.address.as_str())
                .collect::<Vec<_>>()
                .join(",");
            record.push("internalIp", internal_ip);
            record.push(
                "osImage",
                info.map(|info| info.os_image.as_str()).unwrap_or_default(),
            );
            record.push(
                "kernelVersion",
                info.map(|info| info.kernel_version.as_str())
                    .unwrap_or_default(),
            );
            record.push(
                "containerRuntime",
                info.map(|info| info.container_runtime_version.as_str())
                    .unwrap_or_default(),
            );
        }
        record
    }
}
