//! One handler per operator, looked up by `(operator, resource kind)`.

use std::{collections::HashMap, fmt::Debug, str::FromStr, sync::LazyLock};

use futures::future::BoxFuture;
use k8s_openapi::api::{
    apps::v1::{Deployment, StatefulSet},
    core::v1::{Namespace, Node, Pod, Service},
};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;

use crate::{
    alias::ResourceKind,
    error::{CREATE_UNSUPPORTED, DELETE_UNSUPPORTED, EXPOSE_UNSUPPORTED, Error, Result},
    format::{ResourceRecord, UsageEntry},
    params::CommandParams,
};

pub mod create;
pub mod delete;
pub mod expose;
pub mod get;
pub mod run;
pub mod top;

/// Operators the interpreter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Get,
    Top,
    Run,
    Expose,
    Delete,
    Create,
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "get" => Ok(Operator::Get),
            "top" => Ok(Operator::Top),
            "run" => Ok(Operator::Run),
            "expose" => Ok(Operator::Expose),
            "delete" => Ok(Operator::Delete),
            "create" => Ok(Operator::Create),
            _ => Err(Error::NoSuchCommand),
        }
    }
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Get,
        Operator::Top,
        Operator::Run,
        Operator::Expose,
        Operator::Delete,
        Operator::Create,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Get => "get",
            Operator::Top => "top",
            Operator::Run => "run",
            Operator::Expose => "expose",
            Operator::Delete => "delete",
            Operator::Create => "create",
        }
    }

    /// Result for a resource this operator has no handler for.
    pub fn fallback(self, resource: &str) -> Result<Outcome> {
        match self {
            // Unknown kinds list as empty.
            Operator::Get => Ok(Outcome::Records {
                kind: resource.to_string(),
                records: Vec::new(),
            }),
            Operator::Expose => Err(Error::Unsupported(EXPOSE_UNSUPPORTED)),
            Operator::Delete => Err(Error::Unsupported(DELETE_UNSUPPORTED)),
            Operator::Create => Err(Error::Unsupported(CREATE_UNSUPPORTED)),
            Operator::Top | Operator::Run => Err(Error::NoSuchCommand),
        }
    }
}

/// What a handler produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `get` listing, rendered by [`crate::format::format_records`].
    Records {
        kind: String,
        records: Vec<ResourceRecord>,
    },
    /// `top` usage, rendered by [`crate::format::format_usage`].
    Usage {
        kind: String,
        entries: Vec<UsageEntry>,
    },
    /// Final text of a mutating command.
    Text(String),
}

pub type HandlerFn =
    for<'a> fn(&'a Client, &'a CommandParams) -> BoxFuture<'a, Result<Outcome>>;

/// Binds a supported kind to its typed API.
///
/// Namespaced kinds are scoped to the command's namespace; cluster scoped
/// kinds ignore it.
pub trait ResourceApi:
    Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug + Send + Sync + 'static
{
    const KIND: ResourceKind;

    fn api(client: Client, namespace: &str) -> Api<Self>;
}

macro_rules! namespaced {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl ResourceApi for $ty {
            const KIND: ResourceKind = ResourceKind::$kind;

            fn api(client: Client, namespace: &str) -> Api<Self> {
                Api::namespaced(client, namespace)
            }
        }
    )*};
}

macro_rules! cluster_scoped {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl ResourceApi for $ty {
            const KIND: ResourceKind = ResourceKind::$kind;

            fn api(client: Client, _namespace: &str) -> Api<Self> {
                Api::all(client)
            }
        }
    )*};
}

namespaced! {
    Pod => Pods,
    Service => Services,
    Deployment => Deployments,
    StatefulSet => StatefulSets,
}

cluster_scoped! {
    Namespace => Namespaces,
    Node => Nodes,
}

type RouteKey = (Operator, Option<ResourceKind>);

static ROUTES: LazyLock<HashMap<RouteKey, HandlerFn>> = LazyLock::new(|| {
    use Operator::*;
    use ResourceKind::*;

    let mut routes: HashMap<RouteKey, HandlerFn> = HashMap::new();
    routes.insert((Get, Some(Pods)), get::boxed::<Pod>);
    routes.insert((Get, Some(Services)), get::boxed::<Service>);
    routes.insert((Get, Some(Deployments)), get::boxed::<Deployment>);
    routes.insert((Get, Some(StatefulSets)), get::boxed::<StatefulSet>);
    routes.insert((Get, Some(Namespaces)), get::boxed::<Namespace>);
    routes.insert((Get, Some(Nodes)), get::boxed::<Node>);
    routes.insert((Top, Some(Pods)), top::boxed_pods);
    routes.insert((Top, Some(Nodes)), top::boxed_nodes);
    routes.insert((Run, None), run::boxed);
    routes.insert((Expose, Some(Pods)), expose::boxed);
    routes.insert((Delete, Some(Pods)), delete::boxed::<Pod>);
    routes.insert((Delete, Some(Services)), delete::boxed::<Service>);
    routes.insert((Delete, Some(Namespaces)), delete::boxed::<Namespace>);
    routes.insert((Create, Some(Namespaces)), create::boxed);
    routes
});

/// Look up the handler for an operator and (canonical) resource.
pub fn route(operator: Operator, resource: Option<&str>) -> Option<HandlerFn> {
    let kind = match resource {
        Some(resource) => Some(ResourceKind::from_alias(resource)?),
        None => None,
    };
    ROUTES.get(&(operator, kind)).copied()
}

/// Name an object is listed under.
pub(crate) fn object_name<K: Resource>(object: &K) -> String {
    object.meta().name.clone().unwrap_or_default()
}

/// `name` is mandatory for every mutating operator.
pub(crate) fn required_name(params: &CommandParams) -> Result<&str> {
    params
        .name
        .as_deref()
        .ok_or_else(|| Error::params(format!("{} requires a name", params.operator)))
}

#[cfg(test)]
pub(crate) mod testing;
