use kube::Client;
use tracing::debug;

use crate::{
    error::Result,
    format::{format_records, format_usage},
    handler::{self, Operator, Outcome},
    help,
    log::Logger,
    params::{self, CommandParams},
};

/// Interpret one command and render its result.
///
/// Every failure is turned into text: grammar errors and upstream failures
/// of `get`/`top` become [`crate::PARAMS_ERROR`] (the cause goes to `logger`),
/// operators without a handler become [`crate::NO_SUCH_COMMAND`].
pub async fn execute<S, L>(client: &Client, tokens: &[S], logger: &L) -> String
where
    S: AsRef<str>,
    L: Logger + ?Sized,
{
    if is_help(tokens) {
        return help().to_string();
    }

    match try_execute(client, tokens).await {
        Ok(text) => text,
        Err(err) => {
            if err.is_upstream() {
                logger.e(&context(tokens), &format!("{err:#}"));
            } else {
                debug!(error = %err, "command rejected");
            }
            err.display_text().to_string()
        }
    }
}

/// Like [`execute`] but hands back the error instead of its display text.
pub async fn try_execute<S: AsRef<str>>(client: &Client, tokens: &[S]) -> Result<String> {
    let params = params::parse(tokens)?;
    let outcome = run(client, &params).await?;
    Ok(render(outcome))
}

async fn run(client: &Client, params: &CommandParams) -> Result<Outcome> {
    let operator: Operator = params.operator.parse()?;
    match handler::route(operator, params.resource.as_deref()) {
        Some(handler) => handler(client, params).await,
        None => operator.fallback(params.resource.as_deref().unwrap_or_default()),
    }
}

fn render(outcome: Outcome) -> String {
    match outcome {
        Outcome::Records { kind, records } => format_records(&kind, &records),
        Outcome::Usage { kind, entries } => format_usage(&kind, &entries),
        Outcome::Text(text) => text,
    }
}

fn is_help<S: AsRef<str>>(tokens: &[S]) -> bool {
    let mut words = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|token| !token.trim().is_empty());
    words.next() == Some("help") && words.next().is_none()
}

fn context<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|token| !token.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::{
        error::{EXPOSE_UNSUPPORTED, Error, NO_SUCH_COMMAND, PARAMS_ERROR},
        handler::testing::{FakeApi, list},
    };

    /// Collects `(context, message)` pairs.
    #[derive(Default)]
    struct RecordingLogger(Mutex<Vec<(String, String)>>);

    impl Logger for RecordingLogger {
        fn e(&self, context: &str, message: &str) {
            self.0
                .lock()
                .unwrap()
                .push((context.to_string(), message.to_string()));
        }
    }

    impl RecordingLogger {
        fn entries(&self) -> Vec<(String, String)> {
            self.0.lock().unwrap().clone()
        }
    }

    async fn exec(fake: &FakeApi, tokens: &[&str]) -> (String, RecordingLogger) {
        let logger = RecordingLogger::default();
        let text = execute(&fake.client(), tokens, &logger).await;
        (text, logger)
    }

    #[tokio::test]
    async fn grammar_errors_never_reach_a_handler() {
        let fake = FakeApi::new();
        for tokens in [
            &["get"][..],
            &["get", "pods", "-n"],
            &["get", "pods", "a", "b"],
            &["run", "web", "--replicas=2"],
        ] {
            let (text, logger) = exec(&fake, tokens).await;
            assert_eq!(text, PARAMS_ERROR, "tokens {tokens:?}");
            assert!(logger.entries().is_empty());
        }
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn unknown_operator_and_top_resource() {
        let fake = FakeApi::new();
        assert_eq!(exec(&fake, &["logs", "web"]).await.0, NO_SUCH_COMMAND);
        assert_eq!(exec(&fake, &["top", "svc"]).await.0, NO_SUCH_COMMAND);
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn unsupported_resources_get_fixed_messages() {
        let fake = FakeApi::new();
        assert_eq!(
            exec(&fake, &["expose", "ns", "dev", "--port=80"]).await.0,
            EXPOSE_UNSUPPORTED
        );
        assert_eq!(
            exec(&fake, &["delete", "deploy", "api"]).await.0,
            "delete only supports pods, services, namespaces"
        );
        assert_eq!(
            exec(&fake, &["create", "po", "web"]).await.0,
            "create only supports namespaces"
        );
    }

    #[tokio::test]
    async fn run_without_image_is_a_parameter_error() {
        let fake = FakeApi::new();
        assert_eq!(exec(&fake, &["run", "web"]).await.0, PARAMS_ERROR);
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn get_renders_records() {
        let fake = FakeApi::new().on(
            "GET",
            "/api/v1/namespaces/dev/services",
            200,
            list(
                "ServiceList",
                vec![json!({
                    "metadata": { "name": "web" },
                    "spec": {
                        "type": "ClusterIP",
                        "clusterIP": "10.96.0.20",
                        "ports": [{ "port": 80, "protocol": "TCP" }]
                    }
                })],
            ),
        );
        let (text, _) = exec(&fake, &["get", "svc", "-n", "dev", "-o", "wide"]).await;
        assert_eq!(
            text,
            "services信息:\n  NAME: web\n    TYPE: ClusterIP\n    CLUSTERIP: 10.96.0.20\
             \n    PORTS: 80/TCP\n    SELECTOR: <none>"
        );
    }

    #[tokio::test]
    async fn get_unknown_kind_is_header_only() {
        let fake = FakeApi::new();
        assert_eq!(exec(&fake, &["get", "configmaps"]).await.0, "configmaps信息:");
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_logged_and_collapsed() {
        let fake = FakeApi::new();
        let (text, logger) = exec(&fake, &["get", "po", "-n", "dev"]).await;
        assert_eq!(text, PARAMS_ERROR);
        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "get po -n dev");
        assert!(entries[0].1.contains("kubernetes error"));
    }

    #[tokio::test]
    async fn top_renders_usage() {
        let fake = FakeApi::new().on(
            "GET",
            "/apis/metrics.k8s.io/v1beta1/nodes",
            200,
            list(
                "NodeMetricsList",
                vec![json!({
                    "metadata": { "name": "node-a" },
                    "usage": { "cpu": "2500000n", "memory": "2048Ki" }
                })],
            ),
        );
        assert_eq!(
            exec(&fake, &["top", "nodes"]).await.0,
            "nodes資源占用信息:\n  NAME: node-a\n    CPU: 2m500000n\n    MEMORY: 2Mi0Ki"
        );
    }

    #[tokio::test]
    async fn help_is_returned_verbatim() {
        let fake = FakeApi::new();
        assert_eq!(exec(&fake, &["", "help", " "]).await.0, help());
        assert_eq!(exec(&fake, &["help", "get"]).await.0, NO_SUCH_COMMAND);
    }

    #[tokio::test]
    async fn try_execute_keeps_the_cause() {
        let fake = FakeApi::new();
        let err = try_execute(&fake.client(), &["top", "svc"]).await.unwrap_err();
        assert!(matches!(err, Error::NoSuchCommand));
        assert_eq!(err.display_text(), NO_SUCH_COMMAND);
    }
}
