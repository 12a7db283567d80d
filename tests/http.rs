//! End-to-end tests against a live listener on an ephemeral port.

use std::net::SocketAddr;

use pretty_assertions::assert_eq;
use statusd::api::{create_router, AppState};
use statusd::server::{self, Server};
use statusd::ServiceError;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Bind an ephemeral loopback port and mark the service ready.
async fn start_server(state: AppState) -> Server {
    let app = create_router(state.clone());
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let server = server::start(addr, app).await.expect("ephemeral bind");
    state.mark_ready();
    server
}

fn url(server: &Server, path: &str) -> String {
    format!("http://{}{}", server.local_addr(), path)
}

#[tokio::test]
async fn supported_routes_return_literal_bodies() {
    let server = start_server(AppState::new(false, None)).await;

    let resp = reqwest::get(url(&server, "/api/hello")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert_eq!(resp.text().await.unwrap(), "Hello, World!");

    let resp = reqwest::get(url(&server, "/")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "Hello, World!");

    let resp = reqwest::get(url(&server, "/healthz")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let health: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(health["status"], "ok");
    let timestamp = health["timestamp"].as_str().unwrap();
    OffsetDateTime::parse(timestamp, &Rfc3339).expect("timestamp must be RFC3339");

    let resp = reqwest::get(url(&server, "/readyz")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), r#"{"ready":true}"#);

    let resp = reqwest::get(url(&server, "/nope")).await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "");

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn healthz_timestamps_are_non_decreasing() {
    let server = start_server(AppState::new(false, None)).await;

    let mut stamps = Vec::new();
    for _ in 0..2 {
        let health: serde_json::Value = reqwest::get(url(&server, "/healthz"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let parsed =
            OffsetDateTime::parse(health["timestamp"].as_str().unwrap(), &Rfc3339).unwrap();
        stamps.push(parsed);
    }
    assert!(stamps[1] >= stamps[0]);

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn status_exposes_startup_counter() {
    let server = start_server(AppState::new(false, None)).await;

    let status: serde_json::Value = reqwest::get(url(&server, "/api/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["status"], "ok");
    assert_eq!(status["startup_invocations"], 1);

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn bind_fails_when_port_is_occupied() {
    let server = start_server(AppState::new(false, None)).await;
    let taken = server.local_addr();

    let app = create_router(AppState::new(false, None));
    let err = server::start(taken, app)
        .await
        .expect_err("second bind must fail");
    assert!(matches!(err, ServiceError::Bind { addr, .. } if addr == taken));

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_refuses_subsequent_connections() {
    let server = start_server(AppState::new(false, None)).await;
    let base = url(&server, "/readyz");

    // A request completed before shutdown gets its full response.
    let resp = reqwest::get(&base).await.unwrap();
    assert_eq!(resp.text().await.unwrap(), r#"{"ready":true}"#);

    server.shutdown().await.unwrap();

    let err = reqwest::get(&base).await.expect_err("listener is closed");
    assert!(err.is_connect(), "expected connection error, got: {err}");
}
