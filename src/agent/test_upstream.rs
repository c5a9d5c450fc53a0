//! In-process HTTP server standing in for the LLM and search APIs.

use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Value,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub(crate) type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// Serve `reply` with `status` for every request; returns the base URL and the request log.
pub(crate) async fn spawn_upstream(status: StatusCode, reply: impl Into<String>) -> (String, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let recorder = log.clone();
    let reply = reply.into();

    let router = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, body: String| {
            let recorder = recorder.clone();
            let reply = reply.clone();
            async move {
                recorder.lock().unwrap().push(RecordedRequest {
                    method,
                    path: uri.path().to_string(),
                    headers,
                    body: serde_json::from_str(&body).unwrap_or(Value::Null),
                });
                (status, reply)
            }
        },
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), log)
}
