//! Shared utilities for integration testing.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::HeaderMap, response::Response, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use inspector_gateway::cache::{GoodEvent, InMemoryValidationCache};
use inspector_gateway::http::{AppState, UiAssets};
use inspector_gateway::iglu::{LookupError, RepoLookup, ResolutionError, SchemaKey, SchemaResolver};
use inspector_gateway::security::{AuthConfigDisclosure, AuthorizationOutcome, Authorizer};

/// Requests received by a mock upstream, as raw HTTP text.
pub type Recorded = Arc<Mutex<Vec<String>>>;

/// Start a mock upstream answering every request with `status` and `body`.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> (SocketAddr, Recorded) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let log = log.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        log.lock().unwrap().push(request);
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

/// Start an upstream that accepts connections and never answers.
pub async fn start_hanging_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Authorizer returning a fixed outcome and counting its calls.
pub struct FakeAuthorizer {
    outcome: AuthorizationOutcome,
    pub calls: AtomicUsize,
}

impl FakeAuthorizer {
    pub fn allowing() -> Arc<Self> {
        Arc::new(Self { outcome: AuthorizationOutcome::Allowed, calls: AtomicUsize::new(0) })
    }

    pub fn denying() -> Arc<Self> {
        Arc::new(Self {
            outcome: AuthorizationOutcome::denied("upstream said no"),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authorizer for FakeAuthorizer {
    async fn authorize(&self, _headers: &HeaderMap) -> AuthorizationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Resolver knowing only `com.acme/click`, counting its calls.
#[derive(Default)]
pub struct FakeResolver {
    pub calls: AtomicUsize,
}

impl FakeResolver {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaResolver for FakeResolver {
    async fn lookup_schema(&self, key: &SchemaKey) -> Result<Value, ResolutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if key.vendor == "com.acme" && key.name == "click" {
            Ok(json!({
                "self": {
                    "vendor": "com.acme",
                    "name": "click",
                    "format": "jsonschema",
                    "version": key.version.to_string()
                },
                "type": "object"
            }))
        } else {
            Err(ResolutionError {
                schema_key: key.to_string(),
                lookup_history: vec![RepoLookup { repository: "Iglu Central".into(), error: LookupError::NotFound }],
            })
        }
    }
}

pub fn good_event(event_type: &str) -> GoodEvent {
    GoodEvent {
        raw_event: json!({ "vendor": "com.snowplowanalytics.snowplow", "version": "tp2" }),
        event_type: Some(event_type.to_string()),
        schema: None,
        contexts: vec![],
        event: json!({ "event": event_type, "app_id": "test" }),
    }
}

/// State over a fresh in-memory cache, a fake resolver and a UI directory
/// that does not exist.
pub fn test_state(
    cache: Arc<InMemoryValidationCache>,
    resolver: Arc<FakeResolver>,
    disclosure: AuthConfigDisclosure,
) -> AppState {
    AppState::new(cache, resolver, disclosure, UiAssets::new("/nonexistent-inspector-ui"))
        .with_passthrough(ingestion_stub())
}

/// Stand-in for the co-hosted ingestion endpoint.
pub fn ingestion_stub() -> Router {
    Router::new().route(
        "/com.snowplowanalytics.snowplow/tp2",
        axum::routing::post(|| async { "ingested" }),
    )
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

pub fn request(method: &str, uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}
