use futures::{FutureExt, future::BoxFuture};
use k8s_openapi::api::core::v1::Pod;
use kube::{Api, Client, api::PostParams};
use serde_json::json;
use tracing::debug;

use super::{Outcome, expose::ServiceRequest};
use crate::{
    error::{Error, Result, upstream_message},
    params::CommandParams,
};

/// Single container pod labelled `run=<name>`.
pub fn pod_manifest(name: &str, image: &str, namespace: &str) -> Result<Pod> {
    Ok(serde_json::from_value(json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "labels": { "run": name },
        },
        "spec": {
            "containers": [{
                "name": name,
                "image": image,
                "imagePullPolicy": "IfNotPresent",
            }]
        }
    }))?)
}

/// Create a pod and, with `--expose=true --port=P`, a ClusterIP service in front of it.
///
/// A failing service does not roll the pod back; both outcomes are reported.
pub async fn run(client: &Client, params: &CommandParams) -> Result<String> {
    let (Some(name), Some(image)) = (params.name.as_deref(), params.image.as_deref()) else {
        return Err(Error::params("run requires a name and --image"));
    };
    let pod = pod_manifest(name, image, &params.namespace)?;
    let service = match (params.expose.as_deref(), params.port.as_deref()) {
        (Some("true"), Some(port)) => Some(ServiceRequest::new(params, name, port)?),
        _ => None,
    };
    debug!(
        namespace = %params.namespace,
        pod = name,
        image,
        expose = service.is_some(),
        "run"
    );

    let api: Api<Pod> = Api::namespaced(client.clone(), &params.namespace);
    if let Err(err) = api.create(&PostParams::default(), &pod).await {
        return Ok(upstream_message(&err));
    }
    let mut text = format!("pod/{name} created");
    if let Some(service) = service {
        text.push('\n');
        text.push_str(&service.create(client).await?);
    }
    Ok(text)
}

pub fn boxed<'a>(client: &'a Client, params: &'a CommandParams) -> BoxFuture<'a, Result<Outcome>> {
    async move { run(client, params).await.map(Outcome::Text) }.boxed()
}
