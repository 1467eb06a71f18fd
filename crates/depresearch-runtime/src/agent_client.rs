//! Client for agents hosted by the research server.
//!
//! `generate` waits for the complete answer; `stream` reads the agent's
//! Server-Sent Events and hands each text delta to the caller as it arrives.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Agent that answers research questions.
pub const RESEARCH_AGENT_ID: &str = "research-agent";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const BODY_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum AgentClientError {
    #[error("Request to research server failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Research server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Research server returned no answer text")]
    EmptyResponse,

    #[error("Research agent reported an error: {0}")]
    Stream(String),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AgentClient {
    client: Client,
    base_url: String,
}

impl AgentClient {
    /// Client for the server on `localhost:<port>`.
    pub fn new(port: u16) -> Result<Self, AgentClientError> {
        Self::with_base_url(format!("http://localhost:{port}"))
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, AgentClientError> {
        // No overall timeout: a research run can take minutes.
        let client = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Send `query` as a single user message and return the agent's answer.
    pub async fn generate(&self, agent_id: &str, query: &str) -> Result<String, AgentClientError> {
        let response = self.post_query(agent_id, "generate", query).await?;

        let parsed: GenerateResponse = response.json().await?;
        parsed
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or(AgentClientError::EmptyResponse)
    }

    /// Send `query` and pass each text delta to `on_text` as it arrives.
    ///
    /// Returns the full answer once the stream ends.
    pub async fn stream<F>(
        &self,
        agent_id: &str,
        query: &str,
        mut on_text: F,
    ) -> Result<String, AgentClientError>
    where
        F: FnMut(&str),
    {
        let response = self.post_query(agent_id, "stream", query).await?;
        let mut body = response.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();
        let mut answer = String::new();
        let mut done = false;

        while !done {
            let Some(chunk) = body.next().await else {
                break;
            };
            buf.extend_from_slice(&chunk?);

            while let Some(line_end) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=line_end).collect();
                if apply_event(&line, &mut answer, &mut on_text)? {
                    done = true;
                    break;
                }
            }
        }

        // A final event may arrive without a trailing newline.
        if !done && !buf.is_empty() {
            apply_event(&buf, &mut answer, &mut on_text)?;
        }

        if answer.trim().is_empty() {
            return Err(AgentClientError::EmptyResponse);
        }
        Ok(answer)
    }

    async fn post_query(
        &self,
        agent_id: &str,
        action: &str,
        query: &str,
    ) -> Result<Response, AgentClientError> {
        let url = format!("{}/api/agents/{agent_id}/{action}", self.base_url);
        let body = GenerateRequest {
            messages: [Message {
                role: "user",
                content: query,
            }],
        };

        debug!(%url, "sending agent request");
        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AgentClientError::Status {
                status,
                body: excerpt(&text),
            });
        }
        Ok(response)
    }
}

/// One decoded line of the agent's event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StreamEvent {
    TextDelta(String),
    Error(String),
    Done,
}

/// Decode one SSE line. Blank lines, comments and non-text events yield `None`.
fn parse_event(line: &str) -> Option<StreamEvent> {
    let data = line.trim().strip_prefix("data:")?.trim();
    if data == "[DONE]" {
        return Some(StreamEvent::Done);
    }

    let event: Value = match serde_json::from_str(data) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "skipping malformed stream event");
            return None;
        }
    };

    match event["type"].as_str()? {
        "text-delta" => event["payload"]["text"]
            .as_str()
            .or_else(|| event["text"].as_str())
            .map(|text| StreamEvent::TextDelta(text.to_string())),
        "error" => {
            let error = &event["payload"]["error"];
            let message = error
                .as_str()
                .or_else(|| error["message"].as_str())
                .map_or_else(|| error.to_string(), str::to_string);
            Some(StreamEvent::Error(message))
        }
        "finish" => Some(StreamEvent::Done),
        _ => None,
    }
}

/// Apply one raw line to `answer`; returns whether the stream is finished.
fn apply_event<F>(line: &[u8], answer: &mut String, on_text: &mut F) -> Result<bool, AgentClientError>
where
    F: FnMut(&str),
{
    match parse_event(&String::from_utf8_lossy(line)) {
        Some(StreamEvent::TextDelta(text)) => {
            on_text(&text);
            answer.push_str(&text);
            Ok(false)
        }
        Some(StreamEvent::Error(message)) => Err(AgentClientError::Stream(message)),
        Some(StreamEvent::Done) => Ok(true),
        None => Ok(false),
    }
}

fn excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
