// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

type Key = (String, String);

/// A mock HTTP service that replays predefined responses per method and path.
///
/// Responses registered for the same route are served in order; the last one
/// repeats once the queue is drained. Every request is recorded.
#[derive(Clone, Default)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<Key, VecDeque<(u16, String)>>>>,
    requests: Arc<Mutex<Vec<Key>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Queue a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service; the service stays usable for assertions
    pub fn client(&self) -> Client {
        Client::new(self.clone(), "default")
    }

    /// Number of requests received for a method and exact path
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, p)| m == method && p == path)
            .count()
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string()));

        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
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

        let (status, body) = self
            .next_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json(&path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

pub const IMAGE_PATH: &str = "/apis/build.pivotal.io/v1alpha1/namespaces/ci/images/app-image";

pub fn build_path(name: &str) -> String {
    format!("/apis/build.pivotal.io/v1alpha1/namespaces/ci/builds/{}", name)
}

/// Create a mock kpack Image JSON response
pub fn image_json(
    resource_version: &str,
    ready: &str,
    latest_image: &str,
    latest_build_ref: &str,
    build_counter: i64,
) -> String {
    serde_json::json!({
        "apiVersion": "build.pivotal.io/v1alpha1",
        "kind": "Image",
        "metadata": {
            "name": "app-image",
            "namespace": "ci",
            "resourceVersion": resource_version,
            "uid": "test-uid"
        },
        "spec": {
            "tag": "registry.example.com/app",
            "serviceAccount": "builder-sa",
            "source": {
                "git": {"url": "https://github.com/example/app", "revision": "main"}
            },
            "build": {
                "env": [{"name": "BP_JAVA_VERSION", "value": "17"}]
            }
        },
        "status": {
            "conditions": [{"type": "Ready", "status": ready}],
            "latestImage": latest_image,
            "latestBuildRef": latest_build_ref,
            "buildCounter": build_counter
        }
    })
    .to_string()
}

/// Create a mock kpack Build JSON response
pub fn build_json(name: &str, url: &str, revision: &str) -> String {
    serde_json::json!({
        "apiVersion": "build.pivotal.io/v1alpha1",
        "kind": "Build",
        "metadata": {"name": name, "namespace": "ci"},
        "spec": {
            "tags": ["registry.example.com/app"],
            "source": {"git": {"url": url, "revision": revision}}
        }
    })
    .to_string()
}

/// Create a 409 conflict response
pub fn conflict_json(name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("Operation cannot be fulfilled on images.build.pivotal.io \"{}\": the object has been modified", name),
        "reason": "Conflict",
        "code": 409
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(path: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} not found", path),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Create a 500 internal error response
pub fn server_error_json() -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": "etcdserver: request timed out",
        "reason": "InternalError",
        "code": 500
    })
    .to_string()
}
