// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

pub const APPLICATIONS_PATH: &str = "/apis/application.kubesphere.io/v2/applications";
pub const VERSIONS_PATH: &str = "/apis/application.kubesphere.io/v2/applicationversions";

type ResponseKey = (String, String, Option<String>);

/// A request seen by the mock
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub label_selector: Option<String>,
    pub body: Option<Value>,
}

/// A mock HTTP service that returns predefined responses based on method, exact path and label selector.
/// PUT requests without a predefined response succeed and echo the request body.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<ResponseKey, (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for list requests with the given label selector
    pub fn on_list(self, path: &str, selector: &str, status: u16, body: &str) -> Self {
        self.insert("GET", path, Some(selector), status, body)
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.insert("PUT", path, None, status, body)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// All PUT requests received so far, in order
    pub fn puts(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "PUT")
            .collect()
    }

    fn insert(self, method: &str, path: &str, selector: Option<&str>, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string(), selector.map(str::to_string)),
            (status, body.to_string()),
        );
        self
    }

    fn find_response(&self, method: &str, path: &str, selector: Option<&str>) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        // Selector-specific responses win over selector-agnostic ones
        if selector.is_some() {
            let key = (method.to_string(), path.to_string(), selector.map(str::to_string));
            if let Some(resp) = responses.get(&key) {
                return Some(resp.clone());
            }
        }

        responses
            .get(&(method.to_string(), path.to_string(), None))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let label_selector = req.uri().query().and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == "labelSelector")
                .map(|(_, v)| v.into_owned())
        });

        let response = self.find_response(&method, &path, label_selector.as_deref());
        let requests = self.requests.clone();

        Box::pin(async move {
            let body = req
                .into_body()
                .collect()
                .await
                .ok()
                .map(|collected| collected.to_bytes())
                .filter(|bytes| !bytes.is_empty())
                .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok());

            requests.lock().unwrap().push(RecordedRequest {
                method: method.clone(),
                path,
                label_selector,
                body: body.clone(),
            });

            let (status, body) = match (response, body) {
                (Some(resp), _) => resp,
                (None, Some(echo)) if method == "PUT" => (200, echo.to_string()),
                // Default 404 for unmatched requests
                (None, _) => (404, not_found_json("resource", "unknown")),
            };

            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock Application JSON object
pub fn application_json(name: &str, labels: &[(&str, &str)]) -> Value {
    let labels: BTreeMap<&str, &str> = labels.iter().copied().collect();
    json!({
        "apiVersion": "application.kubesphere.io/v2",
        "kind": "Application",
        "metadata": {
            "name": name,
            "resourceVersion": "1",
            "labels": labels
        },
        "spec": {
            "appType": "helm"
        },
        "status": {
            "state": "draft"
        }
    })
}

/// Create a mock ApplicationVersion JSON object belonging to `app_name`
pub fn version_json(name: &str, app_name: &str) -> Value {
    json!({
        "apiVersion": "application.kubesphere.io/v2",
        "kind": "ApplicationVersion",
        "metadata": {
            "name": name,
            "resourceVersion": "1",
            "labels": {
                "application.kubesphere.io/app-id": app_name
            }
        },
        "spec": {
            "versionName": "1.0.0"
        },
        "status": {
            "state": "draft"
        }
    })
}

/// Create a mock list response
pub fn list_json(kind: &str, items: Vec<Value>) -> String {
    json!({
        "apiVersion": "application.kubesphere.io/v2",
        "kind": format!("{}List", kind),
        "metadata": {
            "resourceVersion": "1"
        },
        "items": items
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Create a failed Status response
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}
