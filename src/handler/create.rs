use futures::{FutureExt, future::BoxFuture};
use k8s_openapi::api::core::v1::Namespace;
use kube::{Api, Client, api::PostParams};
use serde_json::json;
use tracing::debug;

use super::{Outcome, required_name};
use crate::{
    error::{Result, upstream_message},
    params::CommandParams,
};

pub fn namespace_manifest(name: &str) -> Result<Namespace> {
    Ok(serde_json::from_value(json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": { "name": name },
    }))?)
}

pub async fn create_namespace(client: &Client, params: &CommandParams) -> Result<String> {
    let name = required_name(params)?;
    debug!(name, "create namespace");
    let namespace = namespace_manifest(name)?;
    let api: Api<Namespace> = Api::all(client.clone());
    Ok(match api.create(&PostParams::default(), &namespace).await {
        Ok(_) => format!("namespace/{name} created"),
        Err(err) => upstream_message(&err),
    })
}

pub fn boxed<'a>(client: &'a Client, params: &'a CommandParams) -> BoxFuture<'a, Result<Outcome>> {
    async move { create_namespace(client, params).await.map(Outcome::Text) }.boxed()
}
