//! Shared helpers for integration tests

#![allow(dead_code)]

use axum::Router;
use bookstore::{api, config::AppConfig, repository::Repository, AppState};

/// Router over a fresh in-memory store
pub fn app() -> Router {
    let state = AppState::new(AppConfig::default(), Repository::in_memory());
    api::create_router(state)
}

/// Serve a fresh app on an ephemeral port; returns the API root URL
pub async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app()).await.expect("Test server failed");
    });

    format!("http://{}/api", addr)
}
