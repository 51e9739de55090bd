use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Token identifying one submit cycle; assigned by the state machine,
/// echoed back on every event so stale results can be dropped.
pub type SessionId = u64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport-level failure (DNS, connect, reset).
    Network,
    Timeout,
    /// Non-2xx response; failure regardless of body content.
    HttpStatus(u16),
    /// 2xx response whose body did not carry the expected field.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

/// Successful current-thumbnail payload, carrying the engine-measured
/// duration of the whole submit cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailFetch {
    pub thumbnail_url: String,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Progress beat for an in-flight session.
    Progress { session: SessionId, percent: u8 },
    SummaryFetched {
        session: SessionId,
        result: Result<String, ApiError>,
    },
    ThumbnailFetched {
        session: SessionId,
        result: Result<ThumbnailFetch, ApiError>,
    },
    ThumbnailsGenerated {
        result: Result<Vec<String>, ApiError>,
    },
    /// Downloads are fire-and-forget; the error text is for logs only.
    DownloadFinished {
        url: String,
        result: Result<PathBuf, String>,
    },
}
