//! In-process fake of the Kubernetes API for handler tests.

use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
};

use http::{Request, Response};
use kube::{Client, client::Body};
use serde_json::{Value, json};

/// Answers canned JSON keyed by `"METHOD /path"` and records every request.
#[derive(Default)]
pub struct FakeApi {
    routes: Vec<(String, u16, Value)>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.routes.push((format!("{method} {path}"), status, body));
        self
    }

    pub fn client(&self) -> Client {
        let routes = Arc::new(self.routes.clone());
        let seen = Arc::clone(&self.seen);
        let service = tower::service_fn(move |request: Request<Body>| {
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&seen);
            async move {
                let key = format!("{} {}", request.method(), request.uri().path());
                seen.lock().expect("request log").push(key.clone());
                let (status, body) = routes
                    .iter()
                    .find(|(route, _, _)| *route == key)
                    .map(|(_, status, body)| (*status, body.clone()))
                    .unwrap_or_else(|| (404, status_body(404, "NotFound", &key)));
                let response = Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).expect("json body")))
                    .expect("response");
                Ok::<_, Infallible>(response)
            }
        });
        Client::new(service, "default")
    }

    /// `"METHOD /path"` of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.seen.lock().expect("request log").clone()
    }
}

pub fn list(kind: &str, items: Vec<Value>) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": kind,
        "metadata": { "resourceVersion": "1" },
        "items": items,
    })
}

pub fn status_body(code: u16, reason: &str, message: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Status",
        "metadata": {},
        "status": if code < 400 { "Success" } else { "Failure" },
        "message": message,
        "reason": reason,
        "code": code,
    })
}
