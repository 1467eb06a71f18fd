//! Stub agent server for HTTP adapter tests.

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral loopback port and return the port.
pub async fn serve(router: Router) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    port
}

/// Agent server whose liveness endpoint answers with `health_status`.
/// The research agent echoes the question back.
pub fn agent_router(health_status: StatusCode) -> Router {
    Router::new()
        .route(
            "/api/agents",
            get(move || async move { (health_status, Json(json!({}))) }),
        )
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
                let question = body["messages"][0]["content"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                sse(&["answer ", "to: ", question.as_str()])
            }),
        )
}

/// Event stream carrying `deltas` as text-delta events.
///
/// Frames are cut mid-line so clients must buffer across reads.
pub fn sse(deltas: &[&str]) -> impl IntoResponse + use<> {
    let mut events = String::from(": connected\n\n");
    events.push_str("data: {\"type\":\"start\",\"payload\":{}}\n\n");
    for delta in deltas {
        let event = json!({ "type": "text-delta", "payload": { "text": delta } });
        events.push_str(&format!("data: {event}\n\n"));
    }
    events.push_str("data: [DONE]\n\n");

    let frames: Vec<Result<Vec<u8>, std::io::Error>> = events
        .as_bytes()
        .chunks(7)
        .map(|chunk| Ok(chunk.to_vec()))
        .collect();

    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(futures_util::stream::iter(frames)),
    )
}

/// A port nothing listens on: bound once, then released.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}
