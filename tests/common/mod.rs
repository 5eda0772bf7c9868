#![allow(dead_code)]

use axum::{
    body,
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use portfolio_contact::configuration::{StoreSettings, StoreType};
use portfolio_contact::store::Store;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub async fn read_body(body: Body) -> String {
    let bytes = body::to_bytes(body, usize::MAX).await.expect("Failed");
    String::from_utf8(bytes.to_vec()).expect("response was not valid utf-8")
}

pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    addr
}

/// Answers one request with `status`, announces a longer body than it sends, then hangs up.
pub async fn truncated_store(status: u16) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept");
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !(request.windows(4).any(|w| w == b"\r\n\r\n") && request.ends_with(b"]")) {
            let read = socket.read(&mut chunk).await.expect("Failed to read request");
            if read == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..read]);
        }
        let head = format!("HTTP/1.1 {status} Rejected\r\ncontent-length: 64\r\n\r\n{{\"message\":");
        socket
            .write_all(head.as_bytes())
            .await
            .expect("Failed to write response");
        socket.shutdown().await.ok();
    });
    format!("http://{addr}")
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    listener.local_addr().expect("Failed to read local address")
}

#[derive(Debug, Clone)]
pub struct StoreRequest {
    pub collection: String,
    pub headers: HeaderMap,
    pub body: Value,
}

/// A stand-in for the hosted store that records every insert and answers
/// with a fixed status and body.
#[derive(Debug, Clone)]
pub struct FakeRemoteStore {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<StoreRequest>>>,
}

impl FakeRemoteStore {
    pub async fn spawn(status: StatusCode, reply: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(vec![]));
        let app = Router::new()
            .route(
                "/rest/v1/:collection",
                post(
                    |State((requests, status, reply)): State<(
                        Arc<Mutex<Vec<StoreRequest>>>,
                        StatusCode,
                        &'static str,
                    )>,
                     Path(collection): Path<String>,
                     headers: HeaderMap,
                     Json(body): Json<Value>| async move {
                        requests.lock().unwrap().push(StoreRequest {
                            collection,
                            headers,
                            body,
                        });
                        (status, reply)
                    },
                ),
            )
            .with_state((Arc::clone(&requests), status, reply));
        let addr = serve(app).await;
        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<StoreRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn remote_store(url: String) -> Store {
    let settings = StoreSettings {
        store_type: StoreType::Remote,
        url: Some(url),
        service_key: Some("test-service-key".to_string()),
        ..Default::default()
    };
    Store::try_from(&settings).expect("Failed to create remote store")
}

pub fn in_memory_store() -> Store {
    Store::try_from(&StoreSettings::default()).expect("Failed to create in memory store")
}
