//! Black-box HTTP tests: a real listener on an ephemeral port, raw HTTP/1.1
//! requests over a TCP socket.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use wallet::gateway::{self, state::AppState};
use wallet::store::{InMemoryAccountStore, InMemoryOperationStore};
use wallet::{AccountManager, TransferEngine};

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let accounts = Arc::new(AccountManager::new(Arc::new(InMemoryAccountStore::new())));
        let engine = Arc::new(TransferEngine::new(
            accounts,
            Arc::new(InMemoryOperationStore::new()),
        ));
        let state = Arc::new(AppState::new(engine));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(gateway::serve(listener, state, async move {
            let _ = rx.await;
        }));

        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    /// Send one request, return (status, parsed JSON body)
    async fn request(&self, method: &str, path: &str, body: Option<&str>) -> (u16, Value) {
        let mut stream = TcpStream::connect(self.addr).await.unwrap();
        let body = body.unwrap_or("");
        let raw = format!(
            "{} {} HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            method,
            path,
            self.addr,
            body.len(),
            body
        );
        stream.write_all(raw.as_bytes()).await.unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        let response = String::from_utf8(response).unwrap();

        let status: u16 = response
            .split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap();
        let payload = response.split("\r\n\r\n").nth(1).unwrap_or("");
        let json = serde_json::from_str(payload).unwrap_or(Value::Null);
        (status, json)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn qa_http_create_send_show() {
    let server = TestServer::start().await;

    let (status, oleg) = server
        .request("POST", "/api/account/create", Some(r#"{"name":"Oleg","balance":"100"}"#))
        .await;
    assert_eq!(status, 201);
    assert_eq!(oleg["code"], 0);
    let oleg_id = oleg["data"]["id"].as_u64().unwrap();

    let (status, german) = server
        .request("POST", "/api/account/create", Some(r#"{"name":"German","balance":"100"}"#))
        .await;
    assert_eq!(status, 201);
    let german_id = german["data"]["id"].as_u64().unwrap();

    let send = format!(
        r#"{{"source_account":{},"destination_account":{},"amount":"50"}}"#,
        oleg_id, german_id
    );
    let (status, op) = server
        .request("POST", "/api/operation/send", Some(&send))
        .await;
    assert_eq!(status, 201);
    assert_eq!(op["data"]["amount"], "50");
    let op_id = op["data"]["id"].as_u64().unwrap();

    let (status, shown) = server
        .request("GET", &format!("/api/operation/show/{}", op_id), None)
        .await;
    assert_eq!(status, 200);
    assert_eq!(shown["data"]["source_account"], oleg_id);

    let (status, account) = server
        .request("GET", &format!("/api/account/show/{}", german_id), None)
        .await;
    assert_eq!(status, 200);
    assert_eq!(account["data"]["balance"], "150");
    assert_eq!(account["data"]["operations"][0], op_id);

    server.stop().await;
}

#[tokio::test]
async fn qa_http_error_statuses() {
    let server = TestServer::start().await;

    let (status, body) = server.request("GET", "/api/account/show/9", None).await;
    assert_eq!(status, 404);
    assert_ne!(body["code"], 0);
    assert!(body.get("data").is_none());

    let (status, _) = server.request("GET", "/api/account/show/nine", None).await;
    assert_eq!(status, 400);

    let (status, body) = server
        .request("POST", "/api/account/create", Some(r#"{"name":"","balance":"1"}"#))
        .await;
    assert_eq!(status, 400);
    assert!(body["msg"].as_str().unwrap().starts_with("INVALID_ACCOUNT"));

    let (status, _) = server
        .request("POST", "/api/account/create", Some(r#"{"name":"X","balance":"-1"}"#))
        .await;
    assert_eq!(status, 400);

    let (status, body) = server
        .request("POST", "/api/account/create", Some(r#"{"name":"X","balance":1234567890.123456789}"#))
        .await;
    assert_eq!(status, 400);
    assert!(body["msg"].as_str().unwrap().contains("decimal string"));

    let (status, _) = server
        .request("POST", "/api/operation/send", Some("{broken"))
        .await;
    assert_eq!(status, 400);

    let (status, body) = server
        .request(
            "POST",
            "/api/operation/send",
            Some(r#"{"source_account":1,"destination_account":2,"amount":"5"}"#),
        )
        .await;
    assert_eq!(status, 404);
    assert!(body["msg"].as_str().unwrap().starts_with("ACCOUNT_NOT_FOUND"));

    let (status, health) = server.request("GET", "/api/health", None).await;
    assert_eq!(status, 200);
    assert_eq!(health["data"]["store"], "memory");

    server.stop().await;
}
