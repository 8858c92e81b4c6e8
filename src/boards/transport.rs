use async_trait::async_trait;
use tracing::debug;

use super::error::BoardsError;
use super::request::{ApiRequest, ApiResponse};

/// Sends one built request and hands back the status and body untouched.
/// Status interpretation is left to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, BoardsError>;
}

/// reqwest-backed transport. No timeout or retry is configured beyond the
/// client defaults.
#[derive(Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, BoardsError> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        debug!(status, bytes = body.len(), "received response");

        Ok(ApiResponse { status, body })
    }
}
