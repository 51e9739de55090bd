use std::time::Duration;

use crate::validate::VideoRef;
use crate::view_model::AppViewModel;

/// Monotonically increasing token identifying one submission cycle.
/// Engine events carry the token they belong to; events from a
/// superseded session are ignored on arrival.
pub type SessionId = u64;

/// Submission lifecycle. Exactly one value at a time instead of a set
/// of independent loading/error flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    ValidatingFailed,
    SubmittingSummary,
    SubmittingThumbnail,
    Ready,
    Failed,
}

/// Which request a failure belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Summary,
    ThumbnailFetch,
    Generation,
}

/// Generic, user-visible error for a failed request. Transport detail
/// is logged by the effect runner, never stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub stage: RequestStage,
    pub message: String,
}

/// One submit -> summary -> thumbnail cycle. A new submission replaces
/// the whole value; it is never merged into an older one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySession {
    pub id: SessionId,
    pub video: VideoRef,
    pub summary: String,
    pub current_thumbnail: String,
    pub elapsed: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    url_error: Option<String>,
    phase: Phase,
    session: Option<SummarySession>,
    progress: u8,
    error: Option<RequestError>,
    include_human: bool,
    include_text: bool,
    generating: bool,
    generated: Vec<String>,
    next_session: SessionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::project(self)
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn url_error(&self) -> Option<&str> {
        self.url_error.as_deref()
    }

    pub fn error(&self) -> Option<&RequestError> {
        self.error.as_ref()
    }

    pub fn session(&self) -> Option<&SummarySession> {
        self.session.as_ref()
    }

    pub fn summary_text(&self) -> &str {
        self.session.as_ref().map_or("", |s| s.summary.as_str())
    }

    pub fn include_human(&self) -> bool {
        self.include_human
    }

    pub fn include_text(&self) -> bool {
        self.include_text
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn generated(&self) -> &[String] {
        &self.generated
    }

    /// True while either network cycle is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            Phase::SubmittingSummary | Phase::SubmittingThumbnail
        ) || self.generating
    }

    pub(crate) fn is_current(&self, session: SessionId) -> bool {
        self.session.as_ref().is_some_and(|s| s.id == session)
    }

    pub(crate) fn set_input(&mut self, input: String, url_error: Option<String>) {
        self.input = input;
        self.url_error = url_error;
        self.mark_dirty();
    }

    pub(crate) fn reject_submission(&mut self, reason: String) {
        self.url_error = Some(reason);
        self.phase = Phase::ValidatingFailed;
        self.mark_dirty();
    }

    /// Starts a fresh session, superseding any in-flight one, and returns
    /// its staleness token. Progress restarts at the submit-accepted beat.
    pub(crate) fn begin_session(&mut self, video: VideoRef) -> SessionId {
        self.next_session += 1;
        let id = self.next_session;
        self.session = Some(SummarySession {
            id,
            video,
            summary: String::new(),
            current_thumbnail: String::new(),
            elapsed: None,
        });
        self.phase = Phase::SubmittingSummary;
        self.url_error = None;
        self.error = None;
        self.progress = 0;
        self.raise_progress(10);
        self.mark_dirty();
        id
    }

    /// Records the summary and moves on to the thumbnail stage. Returns
    /// the request payload for the follow-up call; `None` only if no
    /// session is active (the caller checks the staleness token first).
    pub(crate) fn apply_summary(&mut self, summary: String) -> Option<(String, String)> {
        let session = self.session.as_mut()?;
        session.summary = summary;
        let payload = (
            session.video.raw_url.clone(),
            session.video.video_id.clone(),
        );
        self.phase = Phase::SubmittingThumbnail;
        self.raise_progress(50);
        self.mark_dirty();
        Some(payload)
    }

    pub(crate) fn complete_session(&mut self, thumbnail_url: String, elapsed: Duration) {
        if let Some(session) = self.session.as_mut() {
            session.current_thumbnail = thumbnail_url;
            session.elapsed = Some(elapsed);
        }
        self.phase = Phase::Ready;
        self.raise_progress(100);
        self.mark_dirty();
    }

    /// Fails the whole cycle: error state supersedes partial success, so
    /// an already-fetched summary is discarded as well.
    pub(crate) fn fail_submission(&mut self, stage: RequestStage, message: String) {
        if let Some(session) = self.session.as_mut() {
            session.summary.clear();
        }
        self.phase = Phase::Failed;
        self.error = Some(RequestError { stage, message });
        self.mark_dirty();
    }

    /// Progress is monotonically non-decreasing within one cycle; stale
    /// or reordered beats are dropped.
    pub(crate) fn raise_progress(&mut self, percent: u8) {
        if percent > self.progress {
            self.progress = percent;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_generation(&mut self) {
        self.generating = true;
        if self
            .error
            .as_ref()
            .is_some_and(|e| e.stage == RequestStage::Generation)
        {
            self.error = None;
        }
        self.mark_dirty();
    }

    /// Replaces the whole generated set with the server-ordered one.
    pub(crate) fn apply_generated(&mut self, thumbnails: Vec<String>) {
        self.generated = thumbnails;
        self.generating = false;
        self.mark_dirty();
    }

    /// The previously generated set is deliberately left in place.
    pub(crate) fn fail_generation(&mut self, message: String) {
        self.generating = false;
        self.error = Some(RequestError {
            stage: RequestStage::Generation,
            message,
        });
        self.mark_dirty();
    }

    pub(crate) fn set_include_human(&mut self, on: bool) {
        self.include_human = on;
        self.mark_dirty();
    }

    pub(crate) fn set_include_text(&mut self, on: bool) {
        self.include_text = on;
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }
}
