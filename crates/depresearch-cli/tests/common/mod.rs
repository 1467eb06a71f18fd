//! Shared fixtures for command tests.

use std::path::Path;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use depresearch_cli::{CliConfig, CliContext, bootstrap};
use depresearch_core::{AppPaths, HealthPolicy};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Context rooted at `root` that probes `127.0.0.1` with a short retry budget.
pub fn context(root: &Path) -> CliContext {
    let mut config = CliConfig::with_paths(AppPaths::from_root(root));
    config.probe_host = "127.0.0.1".to_string();
    config.health_policy = HealthPolicy::new(3, Duration::from_millis(50));
    bootstrap(config).unwrap()
}

/// Healthy agent server that echoes research questions. Returns its port.
#[allow(dead_code)]
pub async fn serve_agent() -> u16 {
    let router = Router::new()
        .route("/api/agents", get(|| async { Json(json!({})) }))
        .route(
            "/api/agents/research-agent/generate",
            post(|Json(body): Json<Value>| async move {
                let question = body["messages"][0]["content"].as_str().unwrap_or_default();
                Json(json!({ "text": format!("answer to: {question}") }))
            }),
        )
        .route(
            "/api/agents/research-agent/stream",
            post(|Json(body): Json<Value>| async move {
                let question = body["messages"][0]["content"].as_str().unwrap_or_default();
                ["answer ", "to: ", question]
                    .iter()
                    .map(|text| {
                        let event = json!({ "type": "text-delta", "payload": { "text": text } });
                        format!("data: {event}\n\n")
                    })
                    .chain(std::iter::once("data: [DONE]\n\n".to_string()))
                    .collect::<String>()
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    port
}
