//! Mock ElevenLabs streaming synthesis endpoint

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Fake MP3 frame header followed by padding
pub const FAKE_MP3: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00];

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Audio,
    /// 401 with `invalid_api_key`
    Reject,
    /// 401 with `quota_exceeded`
    QuotaExceeded,
    /// 200 HTML page instead of audio
    Html,
}

pub struct MockElevenLabs {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockElevenLabsState>,
}

struct MockElevenLabsState {
    reply: Reply,
    synthesis_count: AtomicU32,
    voices: Mutex<Vec<String>>,
    api_keys: Mutex<Vec<String>>,
}

impl MockElevenLabs {
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockElevenLabsState {
            reply,
            synthesis_count: AtomicU32::new(0),
            voices: Mutex::new(Vec::new()),
            api_keys: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/text-to-speech/{voice_id}/stream", routing::post(handle_stream))
            .with_state(Arc::clone(&state));

        let (addr, shutdown) = super::serve(app).await?;

        Ok(Self { addr, shutdown, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn synthesis_count(&self) -> u32 {
        self.state.synthesis_count.load(Ordering::Relaxed)
    }

    pub fn voices(&self) -> Vec<String> {
        self.state.voices.lock().unwrap().clone()
    }

    pub fn api_keys(&self) -> Vec<String> {
        self.state.api_keys.lock().unwrap().clone()
    }
}

impl Drop for MockElevenLabs {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_stream(
    State(state): State<Arc<MockElevenLabsState>>,
    Path(voice_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.synthesis_count.fetch_add(1, Ordering::Relaxed);
    state.voices.lock().unwrap().push(voice_id);

    if let Some(key) = headers.get("xi-api-key").and_then(|v| v.to_str().ok()) {
        state.api_keys.lock().unwrap().push(key.to_owned());
    }

    assert!(body["text"].as_str().is_some_and(|text| !text.is_empty()));
    assert_eq!(body["voice_settings"]["stability"], 0.5);

    match state.reply {
        Reply::Audio => ([(header::CONTENT_TYPE, "audio/mpeg")], FAKE_MP3).into_response(),
        Reply::Html => ([(header::CONTENT_TYPE, "text/html")], "<html>maintenance</html>").into_response(),
        Reply::Reject => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": { "status": "invalid_api_key", "message": "Invalid API key" } })),
        )
            .into_response(),
        Reply::QuotaExceeded => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "detail": {
                    "status": "quota_exceeded",
                    "message": "This request exceeds your quota. You have 0 credits remaining."
                }
            })),
        )
            .into_response(),
    }
}
