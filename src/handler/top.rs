use futures::{FutureExt, future::BoxFuture};
use kube::{Api, Client, api::ListParams};
use tracing::debug;

use super::{Outcome, object_name};
use crate::{
    alias::ResourceKind,
    error::Result,
    format::{Usage, UsageEntry},
    metrics::{self, NodeMetrics, PodMetrics},
    params::CommandParams,
    units::{format_kibibytes, format_nanocores, ki_to_mi_or_gi, kibibytes, nanocores, nc_to_mc},
};

fn usage(cpu: &str, memory: &str) -> Usage {
    Usage {
        cpu: nc_to_mc(cpu),
        memory: ki_to_mi_or_gi(memory),
    }
}

/// Pod totals, only when every container reported parseable quantities.
fn pod_total(pod: &PodMetrics) -> Option<Usage> {
    let mut cpu = 0u64;
    let mut memory = 0u64;
    for container in &pod.containers {
        cpu = cpu.checked_add(nanocores(metrics::cpu(&container.usage))?)?;
        memory = memory.checked_add(kibibytes(metrics::memory(&container.usage))?)?;
    }
    Some(Usage {
        cpu: format_nanocores(cpu),
        memory: format_kibibytes(memory),
    })
}

fn pod_entry(pod: &PodMetrics) -> UsageEntry {
    UsageEntry {
        name: object_name(pod),
        usage: pod_total(pod),
        containers: pod
            .containers
            .iter()
            .map(|container| {
                (
                    container.name.clone(),
                    usage(
                        metrics::cpu(&container.usage),
                        metrics::memory(&container.usage),
                    ),
                )
            })
            .collect(),
    }
}

fn node_entry(node: &NodeMetrics) -> UsageEntry {
    UsageEntry {
        name: object_name(node),
        usage: Some(usage(metrics::cpu(&node.usage), metrics::memory(&node.usage))),
        containers: Vec::new(),
    }
}

/// Live pod usage in the command's namespace.
pub async fn pods(client: &Client, params: &CommandParams) -> Result<Vec<UsageEntry>> {
    debug!(namespace = %params.namespace, name = ?params.name, "top pods");
    let api: Api<PodMetrics> = Api::namespaced(client.clone(), &params.namespace);
    let list = api.list(&ListParams::default()).await?;
    Ok(list
        .items
        .iter()
        .filter(|pod| params.name_matches(&object_name(*pod)))
        .map(pod_entry)
        .collect())
}

/// Live node usage.
pub async fn nodes(client: &Client, params: &CommandParams) -> Result<Vec<UsageEntry>> {
    debug!(name = ?params.name, "top nodes");
    let api: Api<NodeMetrics> = Api::all(client.clone());
    let list = api.list(&ListParams::default()).await?;
    Ok(list
        .items
        .iter()
        .filter(|node| params.name_matches(&object_name(*node)))
        .map(node_entry)
        .collect())
}

pub fn boxed_pods<'a>(
    client: &'a Client,
    params: &'a CommandParams,
) -> BoxFuture<'a, Result<Outcome>> {
    async move {
        pods(client, params).await.map(|entries| Outcome::Usage {
            kind: ResourceKind::Pods.to_string(),
            entries,
        })
    }
    .boxed()
}

pub fn boxed_nodes<'a>(
    client: &'a Client,
    params: &'a CommandParams,
) -> BoxFuture<'a, Result<Outcome>> {
    async move {
        nodes(client, params).await.map(|entries| Outcome::Usage {
            kind: ResourceKind::Nodes.to_string(),
            entries,
        })
    }
    .boxed()
}
