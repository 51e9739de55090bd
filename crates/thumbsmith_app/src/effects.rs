use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use client_logging::{client_info, client_warn};
use thumbsmith_core::{Effect, FetchedThumbnail, Msg};
use thumbsmith_engine::{EngineConfig, EngineEvent, EngineHandle};

/// Executes core effects on the engine and feeds engine events back into
/// the message loop as core messages.
pub struct EffectRunner {
    engine: EngineHandle,
    downloads_in_flight: Arc<AtomicUsize>,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, config: EngineConfig) -> Self {
        let (engine, event_rx) = EngineHandle::new(config);
        let downloads_in_flight = Arc::new(AtomicUsize::new(0));

        let downloads = downloads_in_flight.clone();
        thread::spawn(move || {
            for event in event_rx.iter() {
                if matches!(event, EngineEvent::DownloadFinished { .. }) {
                    downloads.fetch_sub(1, Ordering::SeqCst);
                }
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            }
        });

        Self {
            engine,
            downloads_in_flight,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchSummary {
                    session,
                    video_url,
                    video_id,
                } => {
                    client_info!("FetchSummary session={} video_id={}", session, video_id);
                    self.engine.fetch_summary(session, video_url, video_id);
                }
                Effect::FetchCurrentThumbnail {
                    session,
                    video_url,
                    video_id,
                } => {
                    client_info!(
                        "FetchCurrentThumbnail session={} video_id={}",
                        session,
                        video_id
                    );
                    self.engine
                        .fetch_current_thumbnail(session, video_url, video_id);
                }
                Effect::GenerateThumbnails {
                    summary,
                    video_url,
                    include_human,
                    include_text,
                } => {
                    client_info!(
                        "GenerateThumbnails summary_len={} include_human={} include_text={}",
                        summary.len(),
                        include_human,
                        include_text
                    );
                    self.engine
                        .generate_thumbnails(summary, video_url, include_human, include_text);
                }
                Effect::DownloadImage { url } => {
                    client_info!("DownloadImage url={}", url);
                    self.downloads_in_flight.fetch_add(1, Ordering::SeqCst);
                    self.engine.download(url);
                }
            }
        }
    }

    /// Downloads are fire-and-forget for the state machine, but the
    /// process should not exit while any are still being written.
    pub fn downloads_in_flight(&self) -> usize {
        self.downloads_in_flight.load(Ordering::SeqCst)
    }
}

/// Converts an engine event into a core message, logging transport
/// detail that must never reach the rendered error text.
fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress { session, percent } => Msg::ProgressReported { session, percent },
        EngineEvent::SummaryFetched { session, result } => Msg::SummaryFetched {
            session,
            result: result.map_err(|err| {
                client_warn!("Summary request failed: {}", err);
                err.to_string()
            }),
        },
        EngineEvent::ThumbnailFetched { session, result } => Msg::ThumbnailFetched {
            session,
            result: result
                .map(|fetched| FetchedThumbnail {
                    thumbnail_url: fetched.thumbnail_url,
                    elapsed: fetched.elapsed,
                })
                .map_err(|err| {
                    client_warn!("Thumbnail request failed: {}", err);
                    err.to_string()
                }),
        },
        EngineEvent::ThumbnailsGenerated { result } => Msg::ThumbnailsGenerated {
            result: result.map_err(|err| {
                client_warn!("Generation request failed: {}", err);
                err.to_string()
            }),
        },
        // Already logged by the engine; nothing for the state machine.
        EngineEvent::DownloadFinished { .. } => Msg::NoOp,
    }
}
