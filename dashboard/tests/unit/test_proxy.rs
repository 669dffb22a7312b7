//! Proxy tests against a local upstream

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::RawQuery;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use octodash::app::state::AppState;
use octodash::errors::DashboardError;
use octodash::http::client::HttpClient;
use octodash::http::octopus::{ListParams, UpstreamApi};
use octodash::proxy::config::{ProxyConfig, API_KEY_HEADER};
use octodash::proxy::forward::ProxyForwarder;
use octodash::server::serve::router;
use octodash::server::state::ServerState;
use secrecy::SecretString;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::common::FakeApi;

async fn echo(headers: HeaderMap, RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({
        "key": headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()),
        "q": query,
    }))
}

async fn forbidden() -> StatusCode {
    StatusCode::FORBIDDEN
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_upstream() -> SocketAddr {
    spawn(
        Router::new()
            .route("/api/Spaces-1/projects", get(echo))
            .route("/api/Spaces-1/machines", get(forbidden)),
    )
    .await
}

fn config(upstream: SocketAddr) -> ProxyConfig {
    ProxyConfig {
        server_url: format!("http://{}", upstream),
        api_key: SecretString::from("API-KEY".to_string()),
        space_id: "Spaces-1".to_string(),
        env_order: "Dev,Test".to_string(),
    }
}

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[tokio::test]
async fn test_forward_injects_key_and_passes_query() {
    let upstream = spawn_upstream().await;
    let forwarder = ProxyForwarder::new(config(upstream)).unwrap();

    let body = forwarder
        .forward(params(&[("endpoint", "/api/{spaceId}/projects"), ("take", "10")]))
        .await
        .unwrap();

    assert_eq!(
        body,
        json!({ "key": "API-KEY", "q": "take=10", "envOrder": "Dev,Test" })
    );
}

#[tokio::test]
async fn test_forward_passes_upstream_status_through() {
    let upstream = spawn_upstream().await;
    let forwarder = ProxyForwarder::new(config(upstream)).unwrap();

    let err = forwarder
        .forward(params(&[("endpoint", "/api/{spaceId}/machines")]))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(err.details().as_deref(), Some("Request failed with status code 403"));
}

#[tokio::test]
async fn test_client_reaches_upstream_through_dashboard_route() {
    let upstream = spawn_upstream().await;

    let forwarder = Arc::new(ProxyForwarder::new(config(upstream)).unwrap());
    let app_state = AppState::with_api(forwarder, Arc::new(FakeApi::default()));
    let server_state = ServerState::new(app_state.forwarder.clone(), app_state.refresher.clone());
    let dashboard = spawn(router(Arc::new(server_state))).await;

    let client = HttpClient::new(&format!("http://{}/api/octopus", dashboard)).unwrap();

    let body = client
        .get_json("/api/{spaceId}/projects", &ListParams::full_page())
        .await
        .unwrap();
    assert_eq!(body["key"], "API-KEY");
    assert_eq!(body["q"], "take=1000");
    assert_eq!(body["envOrder"], "Dev,Test");

    match client
        .get_json("/api/{spaceId}/machines", &ListParams::full_page())
        .await
    {
        Err(DashboardError::Upstream { status, message }) => {
            assert_eq!(status, Some(403));
            assert_eq!(message, "Request failed with status code 403");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}
