//! In-process HTTP backend shared by the integration tests. Real sockets, no mocks.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Exchanges stored by the stub backend, newest last.
#[derive(Clone, Default)]
pub struct Store {
    pub exchanges: Arc<Mutex<Vec<Value>>>,
}

impl Store {
    pub fn with_exchanges(exchanges: Vec<Value>) -> Self {
        Self {
            exchanges: Arc::new(Mutex::new(exchanges)),
        }
    }

    pub fn len(&self) -> usize {
        self.exchanges.lock().unwrap().len()
    }
}

async fn ask(State(store): State<Store>, Json(body): Json<Value>) -> Json<Value> {
    let text = body["text"].as_str().unwrap_or_default().to_string();
    let answer = if text == "hello" {
        "hi there".to_string()
    } else {
        format!("echo: {}", text)
    };
    let mut exchanges = store.exchanges.lock().unwrap();
    let id = exchanges.len() as i64 + 1;
    exchanges.push(json!({ "id": id, "prompt": text, "response": answer }));
    Json(json!({ "answer": answer }))
}

async fn history(State(store): State<Store>) -> Json<Value> {
    // Newest first, as the reference backend orders by id descending.
    let mut exchanges = store.exchanges.lock().unwrap().clone();
    exchanges.reverse();
    Json(Value::Array(exchanges))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Backend that answers, stores, and lists exchanges.
pub fn working_backend(store: Store) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/history", get(history))
        .route("/health", get(health))
        .with_state(store)
}

/// Backend that reports a missing API key with a 200 status, like the
/// reference backend does, and fails history with a 500.
pub fn misconfigured_backend() -> Router {
    Router::new()
        .route(
            "/ask",
            post(|| async {
                Json(json!({ "error": "OpenAI API key not set. Please add it to your .env file." }))
            }),
        )
        .route(
            "/history",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "database unavailable" })),
                )
            }),
        )
        .route(
            "/health",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
}

/// Serve `router` on an ephemeral port of the current runtime; returns the base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Serve `router` from a dedicated thread, for tests that drive a child process.
pub fn serve_in_thread(router: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });
    format!("http://{}", addr)
}

/// A base URL where nothing is listening.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
