//! Thumbsmith engine: backend API client and effect execution.
mod api;
mod download;
mod engine;
mod types;

pub use api::{ApiSettings, Backend, ChannelProgressSink, ProgressSink, ReqwestBackend};
pub use download::{
    download_filename, ensure_download_dir, AtomicFileWriter, DownloadError, ImageDownloader,
};
pub use engine::{EngineConfig, EngineHandle};
pub use types::{ApiError, EngineEvent, FailureKind, SessionId, ThumbnailFetch};
