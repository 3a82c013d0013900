use anyhow::Context;
use kube::{
    Client, Config,
    config::{KubeConfigOptions, Kubeconfig},
};
use tracing::debug;

/// Parse a kubeconfig document held in memory.
pub fn load_kubeconfig(yaml: &str) -> anyhow::Result<Kubeconfig> {
    Kubeconfig::from_yaml(yaml).context("Failed to parse kubeconfig")
}

/// Detects the Kubernetes context to use with `kubeconfig`.
///
/// Context determination follows this priority:
/// 1. Uses the context if explicitly specified.
/// 2. Uses the current context of the kubeconfig.
///
/// # Errors
/// Returns an error if neither is available, or if the explicit context is unknown.
pub fn determine_context(kubeconfig: &Kubeconfig, context: Option<&str>) -> anyhow::Result<String> {
    match context {
        Some(context) => {
            if kubeconfig.contexts.iter().any(|c| c.name == context) {
                Ok(context.to_string())
            } else {
                Err(anyhow::anyhow!("context {context:?} not found in kubeconfig"))
            }
        }
        None => kubeconfig
            .current_context
            .clone()
            .ok_or_else(|| anyhow::anyhow!("current_context is not set")),
    }
}

/// Build a client for `context` (or the current context) of `kubeconfig`.
pub async fn connect(kubeconfig: Kubeconfig, context: Option<&str>) -> anyhow::Result<Client> {
    let context = determine_context(&kubeconfig, context)?;
    debug!(context = %context, "connecting");
    let options = KubeConfigOptions {
        context: Some(context.clone()),
        ..Default::default()
    };
    let config = Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .with_context(|| format!("Failed to load client config for context {context:?}"))?;
    Client::try_from(config).context("Failed to create Kubernetes client")
}

/// [`load_kubeconfig`] followed by [`connect`].
pub async fn connect_from_str(yaml: &str, context: Option<&str>) -> anyhow::Result<Client> {
    connect(load_kubeconfig(yaml)?, context).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: dev
clusters:
  - name: local
    cluster:
      server: https://127.0.0.1:6443
      insecure-skip-tls-verify: true
contexts:
  - name: dev
    context:
      cluster: local
      user: admin
      namespace: dev
  - name: prod
    context:
      cluster: local
      user: admin
users:
  - name: admin
    user:
      token: not-a-real-token
"#;

    #[test]
    fn current_context_is_the_default() {
        let kubeconfig = load_kubeconfig(KUBECONFIG).unwrap();
        assert_eq!(determine_context(&kubeconfig, None).unwrap(), "dev");
        assert_eq!(determine_context(&kubeconfig, Some("prod")).unwrap(), "prod");
        assert!(determine_context(&kubeconfig, Some("staging")).is_err());
    }

    #[test]
    fn missing_current_context_is_an_error() {
        let kubeconfig = load_kubeconfig("apiVersion: v1\nkind: Config\n").unwrap();
        assert!(determine_context(&kubeconfig, None).is_err());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(load_kubeconfig("clusters: [").is_err());
    }

    #[tokio::test]
    async fn builds_a_client_without_contacting_the_cluster() {
        let client = connect_from_str(KUBECONFIG, Some("dev")).await.unwrap();
        assert_eq!(client.default_namespace(), "dev");
    }
}
