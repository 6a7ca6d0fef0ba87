//! Mock STS (query protocol) and Polly (REST JSON) endpoints behind one address
//!
//! Point `aws.endpoint_url` at [`MockAws::endpoint_url`] and both SDK clients
//! will send their requests here.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::json;
use tokio_util::sync::CancellationToken;

pub const ACCOUNT: &str = "123456789012";
pub const ARN: &str = "arn:aws:iam::123456789012:user/credcheck";

const FAKE_MP3: &[u8] = &[0xFF, 0xF3, 0x44, 0xC4, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];

#[derive(Debug, Clone, Copy)]
pub enum StsReply {
    Identity,
    /// 403 `InvalidClientTokenId`
    InvalidToken,
    /// 403 `SignatureDoesNotMatch`
    SignatureMismatch,
    /// 400 `Throttling`
    Throttled,
}

#[derive(Debug, Clone, Copy)]
pub enum PollyReply {
    Audio,
    /// 400 `UnrecognizedClientException`, as for an account without Polly access
    Unrecognized,
    /// 400 `ThrottlingException`
    Throttled,
}

pub struct MockAws {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockAwsState>,
}

struct MockAwsState {
    sts: StsReply,
    polly: PollyReply,
    sts_count: AtomicU32,
    polly_count: AtomicU32,
}

impl MockAws {
    pub async fn start(sts: StsReply, polly: PollyReply) -> anyhow::Result<Self> {
        let state = Arc::new(MockAwsState {
            sts,
            polly,
            sts_count: AtomicU32::new(0),
            polly_count: AtomicU32::new(0),
        });

        let app = Router::new()
            .route("/", routing::post(handle_sts))
            .route("/v1/speech", routing::post(handle_synthesize_speech))
            .with_state(Arc::clone(&state));

        let (addr, shutdown) = super::serve(app).await?;

        Ok(Self { addr, shutdown, state })
    }

    pub fn endpoint_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn sts_count(&self) -> u32 {
        self.state.sts_count.load(Ordering::Relaxed)
    }

    pub fn polly_count(&self) -> u32 {
        self.state.polly_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockAws {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_sts(State(state): State<Arc<MockAwsState>>, body: String) -> Response {
    state.sts_count.fetch_add(1, Ordering::Relaxed);
    assert!(body.contains("Action=GetCallerIdentity"), "unexpected STS action: {body}");

    match state.sts {
        StsReply::Identity => xml(
            StatusCode::OK,
            format!(
                r#"<GetCallerIdentityResponse xmlns="https://sts.amazonaws.com/doc/2011-06-15/">
  <GetCallerIdentityResult>
    <Arn>{ARN}</Arn>
    <UserId>AIDAMOCKUSERID</UserId>
    <Account>{ACCOUNT}</Account>
  </GetCallerIdentityResult>
  <ResponseMetadata>
    <RequestId>01234567-89ab-cdef-0123-456789abcdef</RequestId>
  </ResponseMetadata>
</GetCallerIdentityResponse>"#
            ),
        ),
        StsReply::InvalidToken => sts_error(
            StatusCode::FORBIDDEN,
            "InvalidClientTokenId",
            "The security token included in the request is invalid.",
        ),
        StsReply::SignatureMismatch => sts_error(
            StatusCode::FORBIDDEN,
            "SignatureDoesNotMatch",
            "The request signature we calculated does not match the signature you provided.",
        ),
        StsReply::Throttled => sts_error(StatusCode::BAD_REQUEST, "Throttling", "Rate exceeded"),
    }
}

fn sts_error(status: StatusCode, code: &str, message: &str) -> Response {
    xml(
        status,
        format!(
            r#"<ErrorResponse xmlns="https://sts.amazonaws.com/doc/2011-06-15/">
  <Error>
    <Type>Sender</Type>
    <Code>{code}</Code>
    <Message>{message}</Message>
  </Error>
  <RequestId>01234567-89ab-cdef-0123-456789abcdef</RequestId>
</ErrorResponse>"#
        ),
    )
}

fn xml(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "text/xml")], body).into_response()
}

async fn handle_synthesize_speech(State(state): State<Arc<MockAwsState>>, body: String) -> Response {
    state.polly_count.fetch_add(1, Ordering::Relaxed);
    let request: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    assert_eq!(request["OutputFormat"], "mp3");

    match state.polly {
        PollyReply::Audio => (
            [
                (header::CONTENT_TYPE.as_str(), "audio/mpeg"),
                ("x-amzn-RequestCharacters", "62"),
            ],
            FAKE_MP3,
        )
            .into_response(),
        PollyReply::Unrecognized => (
            StatusCode::BAD_REQUEST,
            [("x-amzn-ErrorType", "UnrecognizedClientException")],
            Json(json!({ "message": "The security token included in the request is invalid." })),
        )
            .into_response(),
        PollyReply::Throttled => (
            StatusCode::BAD_REQUEST,
            [("x-amzn-ErrorType", "ThrottlingException")],
            Json(json!({ "message": "Rate exceeded" })),
        )
            .into_response(),
    }
}
