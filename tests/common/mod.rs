//! Shared utilities for integration and load testing.

use std::net::SocketAddr;

use axum::{extract::Request, http::HeaderName, Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use xrequest_trace::{Config, Context, RequestIdExt, RequestTraceLayer, TRACEPARENT, X_REQUEST_ID};

/// What the backend saw after the middleware ran.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Seen {
    pub x_request_id: Option<String>,
    pub traceparent: Option<String>,
    pub extension: Option<String>,
}

/// Start an echo backend wrapped in the request trace layer on an ephemeral port.
pub async fn start_traced_backend(config: Config) -> SocketAddr {
    xrequest_trace::observability::init_tracing("xrequest_trace=debug");

    let layer = RequestTraceLayer::new(&Context::new(), &config, "xrequesttrace-plugin").unwrap();
    let app = Router::new().fallback(echo).layer(layer);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Send a GET with the given headers and decode what the backend saw.
#[allow(dead_code)]
pub async fn fetch(client: &reqwest::Client, addr: SocketAddr, headers: &[(&str, &str)]) -> Seen {
    let mut req = client.get(format!("http://{addr}/"));
    for (name, value) in headers {
        req = req.header(*name, *value);
    }
    let res = req.send().await.expect("backend unreachable");
    assert!(res.status().is_success());
    res.json().await.unwrap()
}

fn header(req: &Request, name: HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

async fn echo(req: Request) -> Json<serde_json::Value> {
    Json(json!({
        "x_request_id": header(&req, X_REQUEST_ID),
        "traceparent": header(&req, TRACEPARENT),
        "extension": req.request_id().and_then(|id| id.as_str()).map(str::to_owned),
    }))
}
