//! Backend API client for the three summarizer endpoints.
//!
//! The wire contract is fixed: JSON POST bodies, `video_url`/`video_id`
//! on the two submit-cycle calls, camelCase modifier keys on the
//! generation call, and a non-2xx status is a failure regardless of the
//! response body.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ApiError, EngineEvent, FailureKind, SessionId};

/// Connection settings for the summarizer backend.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// `None` imposes no deadline: a hung backend leaves the cycle
    /// outstanding until it resolves or the process exits.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn summarize(&self, video_url: &str, video_id: &str) -> Result<String, ApiError>;

    /// Fetches the video's existing thumbnail. Emits the 75% beat on the
    /// sink once the response has arrived, before the body is parsed.
    async fn current_thumbnail(
        &self,
        session: SessionId,
        video_url: &str,
        video_id: &str,
        sink: &dyn ProgressSink,
    ) -> Result<String, ApiError>;

    /// Requests AI-generated thumbnail candidates. The returned order is
    /// the server's; callers must not reorder it.
    async fn generate_thumbnails(
        &self,
        summary: &str,
        video_url: &str,
        include_human: bool,
        include_text: bool,
    ) -> Result<Vec<String>, ApiError>;
}

#[derive(Serialize)]
struct VideoRequest<'a> {
    video_url: &'a str,
    video_id: &'a str,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    summary: &'a str,
    video_url: &'a str,
    #[serde(rename = "includeHuman")]
    include_human: bool,
    #[serde(rename = "includeText")]
    include_text: bool,
}

#[derive(Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Deserialize)]
struct ThumbnailResponse {
    thumbnail_url: String,
}

#[derive(Deserialize)]
struct ThumbnailsResponse {
    thumbnails: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ApiSettings,
}

impl ReqwestBackend {
    pub fn new(settings: ApiSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        let client = self.build_client()?;
        let response = client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn summarize(&self, video_url: &str, video_id: &str) -> Result<String, ApiError> {
        let response = self
            .post("/summarize", &VideoRequest { video_url, video_id })
            .await?;
        let body: SummaryResponse = response.json().await.map_err(map_body_error)?;
        Ok(body.summary)
    }

    async fn current_thumbnail(
        &self,
        session: SessionId,
        video_url: &str,
        video_id: &str,
        sink: &dyn ProgressSink,
    ) -> Result<String, ApiError> {
        let response = self
            .post("/get_current_thumbnail", &VideoRequest { video_url, video_id })
            .await?;
        sink.emit(EngineEvent::Progress {
            session,
            percent: 75,
        });
        let body: ThumbnailResponse = response.json().await.map_err(map_body_error)?;
        Ok(body.thumbnail_url)
    }

    async fn generate_thumbnails(
        &self,
        summary: &str,
        video_url: &str,
        include_human: bool,
        include_text: bool,
    ) -> Result<Vec<String>, ApiError> {
        let response = self
            .post(
                "/generate_thumbnails",
                &GenerateRequest {
                    summary,
                    video_url,
                    include_human,
                    include_text,
                },
            )
            .await?;
        let body: ThumbnailsResponse = response.json().await.map_err(map_body_error)?;
        Ok(body.thumbnails)
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

fn map_body_error(err: reqwest::Error) -> ApiError {
    ApiError::new(FailureKind::MalformedResponse, err.to_string())
}
