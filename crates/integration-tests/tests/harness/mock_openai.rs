//! Mock OpenAI chat completions endpoint

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// How the mock answers every completion request
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// 200 with the given assistant text
    Complete(&'static str),
    /// 401 invalid API key
    Reject,
    /// 429 rate limit
    RateLimit,
    /// 200 with no choices
    Empty,
}

pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockOpenAiState>,
}

struct MockOpenAiState {
    reply: Reply,
    completion_count: AtomicU32,
    max_tokens: Mutex<Vec<u32>>,
    bearer_tokens: Mutex<Vec<String>>,
}

impl MockOpenAi {
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockOpenAiState {
            reply,
            completion_count: AtomicU32::new(0),
            max_tokens: Mutex::new(Vec::new()),
            bearer_tokens: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let (addr, shutdown) = super::serve(app).await?;

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL including `/v1`, as configured for the real API
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    /// `max_tokens` of each request, in arrival order
    pub fn max_tokens(&self) -> Vec<u32> {
        self.state.max_tokens.lock().unwrap().clone()
    }

    /// Bearer tokens presented, in arrival order
    pub fn bearer_tokens(&self) -> Vec<String> {
        self.state.bearer_tokens.lock().unwrap().clone()
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<serde_json::Value>,
    max_tokens: u32,
}

async fn handle_chat_completions(
    State(state): State<Arc<MockOpenAiState>>,
    headers: HeaderMap,
    Json(request): Json<ChatCompletionRequest>,
) -> Response {
    state.completion_count.fetch_add(1, Ordering::Relaxed);
    state.max_tokens.lock().unwrap().push(request.max_tokens);

    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        state.bearer_tokens.lock().unwrap().push(token.to_owned());
    }

    assert_eq!(request.messages.len(), 2, "probe sends a system and a user message");

    match state.reply {
        Reply::Complete(text) => Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "created": 0,
            "model": request.model,
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": text },
                "finish_reason": "stop"
            }]
        }))
        .into_response(),
        Reply::Empty => Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "created": 0,
            "model": request.model,
            "choices": []
        }))
        .into_response(),
        Reply::Reject => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": {
                    "message": "Incorrect API key provided: sk-bad. You can find your API key at https://platform.openai.com/account/api-keys.",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key"
                }
            })),
        )
            .into_response(),
        Reply::RateLimit => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": {
                    "message": "Rate limit reached for gpt-3.5-turbo on requests per min.",
                    "type": "requests",
                    "code": "rate_limit_exceeded"
                }
            })),
        )
            .into_response(),
    }
}
