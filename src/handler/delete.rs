use futures::{FutureExt, future::BoxFuture};
use kube::{Client, api::DeleteParams};
use tracing::debug;

use super::{Outcome, ResourceApi, required_name};
use crate::{
    error::{Result, upstream_message},
    params::CommandParams,
};

/// Delete the named `K`, scoped to the command's namespace for namespaced kinds.
pub async fn delete<K: ResourceApi>(client: &Client, params: &CommandParams) -> Result<String> {
    let name = required_name(params)?;
    debug!(kind = %K::KIND, namespace = %params.namespace, name, "delete");
    let api = K::api(client.clone(), &params.namespace);
    Ok(match api.delete(name, &DeleteParams::default()).await {
        Ok(_) => format!("{} \"{name}\" deleted", K::KIND.singular()),
        Err(err) => upstream_message(&err),
    })
}

pub fn boxed<'a, K: ResourceApi>(
    client: &'a Client,
    params: &'a CommandParams,
) -> BoxFuture<'a, Result<Outcome>> {
    async move { delete::<K>(client, params).await.map(Outcome::Text) }.boxed()
}
