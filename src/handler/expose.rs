use futures::{FutureExt, future::BoxFuture};
use k8s_openapi::api::core::v1::Service;
use kube::{Api, Client, api::PostParams};
use serde_json::{Value, json};
use tracing::debug;

use super::{Outcome, required_name};
use crate::{
    error::{Error, Result, upstream_message},
    params::CommandParams,
};

const DEFAULT_SERVICE_TYPE: &str = "ClusterIP";

/// A service selecting the pods labelled `run=<selector>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub name: String,
    pub namespace: String,
    pub selector: String,
    pub service_type: String,
    pub port: i32,
    pub target_port: Value,
    pub node_port: Option<i32>,
}

fn parse_port(flag: &str, raw: &str) -> Result<i32> {
    raw.parse()
        .map_err(|_| Error::params(format!("--{flag} must be a port number, got {raw:?}")))
}

/// Numeric target ports are sent as integers, anything else as a named port.
fn target_port(raw: &str) -> Value {
    match raw.parse::<i32>() {
        Ok(port) => json!(port),
        Err(_) => json!(raw),
    }
}

impl ServiceRequest {
    /// Service for `selector` exposing `port`, forwarding to `--target-port` or `port`.
    pub fn new(params: &CommandParams, selector: &str, port: &str) -> Result<Self> {
        Ok(Self {
            name: selector.to_string(),
            namespace: params.namespace.clone(),
            selector: selector.to_string(),
            service_type: DEFAULT_SERVICE_TYPE.to_string(),
            port: parse_port("port", port)?,
            target_port: target_port(params.target_port.as_deref().unwrap_or(port)),
            node_port: None,
        })
    }

    /// Full `expose` request: honours `--type`, `--node-port` and `--name`.
    pub fn from_params(params: &CommandParams) -> Result<Self> {
        let name = required_name(params)?;
        let port = params
            .port
            .as_deref()
            .ok_or_else(|| Error::params("expose requires --port"))?;
        let mut request = Self::new(params, name, port)?;
        if let Some(inner_name) = &params.inner_name {
            request.name = inner_name.clone();
        }
        if let Some(service_type) = &params.service_type {
            request.service_type = service_type.clone();
        }
        if request.service_type == "NodePort" {
            request.node_port = params
                .node_port
                .as_deref()
                .map(|raw| parse_port("node-port", raw))
                .transpose()?;
        }
        Ok(request)
    }

    pub fn manifest(&self) -> Result<Service> {
        let mut port = json!({
            "port": self.port,
            "targetPort": self.target_port,
            "protocol": "TCP",
        });
        if let Some(node_port) = self.node_port {
            port["nodePort"] = json!(node_port);
        }
        let service = json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {
                "name": self.name,
                "namespace": self.namespace,
            },
            "spec": {
                "type": self.service_type,
                "selector": { "run": self.selector },
                "ports": [port],
            }
        });
        Ok(serde_json::from_value(service)?)
    }

    /// Create the service, returning the success text or the upstream failure text.
    pub async fn create(&self, client: &Client) -> Result<String> {
        let service = self.manifest()?;
        let api: Api<Service> = Api::namespaced(client.clone(), &self.namespace);
        Ok(match api.create(&PostParams::default(), &service).await {
            Ok(_) => format!("service/{} created", self.name),
            Err(err) => upstream_message(&err),
        })
    }
}

pub async fn expose(client: &Client, params: &CommandParams) -> Result<String> {
    let request = ServiceRequest::from_params(params)?;
    debug!(
        namespace = %request.namespace,
        service = %request.name,
        service_type = %request.service_type,
        "expose"
    );
    request.create(client).await
}

pub fn boxed<'a>(client: &'a Client, params: &'a CommandParams) -> BoxFuture<'a, Result<Outcome>> {
    async move { expose(client, params).await.map(Outcome::Text) }.boxed()
}

#[cfg(test)]
mod tests {
    use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

    use super::*;
    use crate::{
        handler::testing::{FakeApi, status_body},
        params::parse,
    };

    #[test]
    fn defaults_follow_the_pod() {
        let params = parse(&["expose", "po", "web", "--port=80"]).unwrap();
        let request = ServiceRequest::from_params(&params).unwrap();
        assert_eq!(request.name, "web");
        assert_eq!(request.selector, "web");
        assert_eq!(request.service_type, "ClusterIP");
        assert_eq!(request.target_port, json!(80));
        assert_eq!(request.node_port, None);

        let service = request.manifest().unwrap();
        let spec = service.spec.expect("spec");
        assert_eq!(spec.type_.as_deref(), Some("ClusterIP"));
        assert_eq!(
            spec.selector.and_then(|s| s.get("run").cloned()).as_deref(),
            Some("web")
        );
        let ports = spec.ports.expect("ports");
        assert_eq!(ports[0].port, 80);
        assert_eq!(ports[0].target_port, Some(IntOrString::Int(80)));
    }

    #[test]
    fn node_port_only_for_node_port_services() {
        let params = parse(&[
            "expose",
            "po",
            "web",
            "--port=80",
            "--target-port=http",
            "--node-port=30080",
            "--name=web-public",
        ])
        .unwrap();
        let request = ServiceRequest::from_params(&params).unwrap();
        assert_eq!(request.node_port, None);
        assert_eq!(request.name, "web-public");
        assert_eq!(request.selector, "web");
        assert_eq!(request.target_port, json!("http"));

        let params = parse(&[
            "expose",
            "po",
            "web",
            "--port=80",
            "--node-port=30080",
            "--type=NodePort",
        ])
        .unwrap();
        let request = ServiceRequest::from_params(&params).unwrap();
        assert_eq!(request.node_port, Some(30080));
        let ports = request.manifest().unwrap().spec.unwrap().ports.unwrap();
        assert_eq!(ports[0].node_port, Some(30080));
    }

    #[test]
    fn missing_or_bad_ports_are_parameter_errors() {
        let params = parse(&["expose", "po", "web"]).unwrap();
        assert!(matches!(
            ServiceRequest::from_params(&params),
            Err(Error::Params(_))
        ));
        let params = parse(&["expose", "po", "web", "--port=http"]).unwrap();
        assert!(ServiceRequest::from_params(&params).is_err());
        let params = parse(&["expose", "po", "--port=80"]).unwrap();
        assert!(ServiceRequest::from_params(&params).is_err());
    }

    #[tokio::test]
    async fn reports_created_or_upstream_message() {
        let params = parse(&["expose", "po", "web", "--port=80", "-n", "dev"]).unwrap();
        let fake = FakeApi::new().on(
            "POST",
            "/api/v1/namespaces/dev/services",
            201,
            json!({ "apiVersion": "v1", "kind": "Service", "metadata": { "name": "web" } }),
        );
        assert_eq!(
            expose(&fake.client(), &params).await.unwrap(),
            "service/web created"
        );

        let fake = FakeApi::new().on(
            "POST",
            "/api/v1/namespaces/dev/services",
            409,
            status_body(409, "AlreadyExists", "services \"web\" already exists"),
        );
        assert_eq!(
            expose(&fake.client(), &params).await.unwrap(),
            "services \"web\" already exists"
        );
    }
}
