use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Instant;

use client_logging::{client_info, client_warn};

use crate::api::{Backend, ChannelProgressSink, ReqwestBackend};
use crate::download::ImageDownloader;
use crate::{ApiSettings, EngineEvent, SessionId, ThumbnailFetch};

type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;
type SessionClocks = Arc<Mutex<HashMap<SessionId, Instant>>>;

/// Engine wiring: backend settings, downloads directory, and the clock
/// used for download filenames (injectable for deterministic tests).
#[derive(Clone)]
pub struct EngineConfig {
    pub api: ApiSettings,
    pub download_dir: PathBuf,
    pub timestamp_millis: Clock,
}

impl EngineConfig {
    pub fn default_with_download_dir(download_dir: PathBuf) -> Self {
        Self {
            api: ApiSettings::default(),
            download_dir,
            timestamp_millis: Arc::new(epoch_millis),
        }
    }
}

fn epoch_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

enum EngineCommand {
    FetchSummary {
        session: SessionId,
        video_url: String,
        video_id: String,
    },
    FetchThumbnail {
        session: SessionId,
        video_url: String,
        video_id: String,
    },
    Generate {
        summary: String,
        video_url: String,
        include_human: bool,
        include_text: bool,
    },
    Download {
        url: String,
    },
}

/// Handle to the engine thread. Commands are queued over a channel and
/// executed on a background tokio runtime; results come back as
/// [`EngineEvent`]s on the receiver returned from [`EngineHandle::new`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let backend = Arc::new(ReqwestBackend::new(config.api.clone()));
        let downloader = Arc::new(ImageDownloader::new(config.download_dir.clone()));
        let clocks: SessionClocks = Arc::new(Mutex::new(HashMap::new()));
        let timestamp_millis = config.timestamp_millis.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let downloader = downloader.clone();
                let event_tx = event_tx.clone();
                let clocks = clocks.clone();
                let timestamp_millis = timestamp_millis.clone();
                runtime.spawn(async move {
                    handle_command(
                        backend.as_ref(),
                        downloader.as_ref(),
                        command,
                        event_tx,
                        clocks,
                        timestamp_millis,
                    )
                    .await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn fetch_summary(
        &self,
        session: SessionId,
        video_url: impl Into<String>,
        video_id: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::FetchSummary {
            session,
            video_url: video_url.into(),
            video_id: video_id.into(),
        });
    }

    pub fn fetch_current_thumbnail(
        &self,
        session: SessionId,
        video_url: impl Into<String>,
        video_id: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::FetchThumbnail {
            session,
            video_url: video_url.into(),
            video_id: video_id.into(),
        });
    }

    pub fn generate_thumbnails(
        &self,
        summary: impl Into<String>,
        video_url: impl Into<String>,
        include_human: bool,
        include_text: bool,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            summary: summary.into(),
            video_url: video_url.into(),
            include_human,
            include_text,
        });
    }

    pub fn download(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Download { url: url.into() });
    }
}

async fn handle_command(
    backend: &dyn Backend,
    downloader: &ImageDownloader,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
    clocks: SessionClocks,
    timestamp_millis: Clock,
) {
    match command {
        EngineCommand::FetchSummary {
            session,
            video_url,
            video_id,
        } => {
            // The submit cycle's clock starts with its first request.
            clocks
                .lock()
                .expect("session clock lock")
                .insert(session, Instant::now());
            let result = backend.summarize(&video_url, &video_id).await;
            let _ = event_tx.send(EngineEvent::SummaryFetched { session, result });
        }
        EngineCommand::FetchThumbnail {
            session,
            video_url,
            video_id,
        } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = backend
                .current_thumbnail(session, &video_url, &video_id, &sink)
                .await;
            let elapsed = clocks
                .lock()
                .expect("session clock lock")
                .remove(&session)
                .map(|started| started.elapsed())
                .unwrap_or_default();
            let result = result.map(|thumbnail_url| ThumbnailFetch {
                thumbnail_url,
                elapsed,
            });
            let _ = event_tx.send(EngineEvent::ThumbnailFetched { session, result });
        }
        EngineCommand::Generate {
            summary,
            video_url,
            include_human,
            include_text,
        } => {
            let result = backend
                .generate_thumbnails(&summary, &video_url, include_human, include_text)
                .await;
            let _ = event_tx.send(EngineEvent::ThumbnailsGenerated { result });
        }
        EngineCommand::Download { url } => {
            let stamp = (*timestamp_millis)();
            let result = downloader.download(&url, stamp).await;
            match &result {
                Ok(path) => client_info!("Saved {} to {:?}", url, path),
                Err(err) => client_warn!("Download of {} failed: {}", url, err),
            }
            let _ = event_tx.send(EngineEvent::DownloadFinished {
                url,
                result: result.map_err(|err| err.to_string()),
            });
        }
    }
}
