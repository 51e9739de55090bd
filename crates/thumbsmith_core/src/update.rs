use crate::{validate, AppState, Effect, Msg, Phase, RequestStage, ValidationResult};

/// User-visible message for any failure of the submit cycle.
pub const PROCESSING_ERROR_MESSAGE: &str = "Error processing video. Please try again.";
/// User-visible message for a failed generation request.
pub const GENERATION_ERROR_MESSAGE: &str = "Error generating thumbnails.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(input) => {
            // Live validation: the inline error tracks the input field and
            // is independent of any in-flight session.
            let url_error = if input.is_empty() {
                None
            } else {
                match validate(&input) {
                    ValidationResult::Valid(_) => None,
                    ValidationResult::Invalid { reason } => Some(reason),
                }
            };
            state.set_input(input, url_error);
            Vec::new()
        }
        Msg::SubmitClicked => match validate(state.input()) {
            ValidationResult::Invalid { reason } => {
                // Fail fast: no network activity for a malformed URL.
                state.reject_submission(reason);
                Vec::new()
            }
            ValidationResult::Valid(video) => {
                let video_url = video.raw_url.clone();
                let video_id = video.video_id.clone();
                let session = state.begin_session(video);
                vec![Effect::FetchSummary {
                    session,
                    video_url,
                    video_id,
                }]
            }
        },
        Msg::SummaryFetched { session, result } => {
            if !state.is_current(session) || state.phase() != Phase::SubmittingSummary {
                // Stale: a newer session has started since this request left.
                return (state, Vec::new());
            }
            match result {
                Ok(summary) => match state.apply_summary(summary) {
                    Some((video_url, video_id)) => vec![Effect::FetchCurrentThumbnail {
                        session,
                        video_url,
                        video_id,
                    }],
                    None => Vec::new(),
                },
                Err(_detail) => {
                    state.fail_submission(RequestStage::Summary, PROCESSING_ERROR_MESSAGE.into());
                    Vec::new()
                }
            }
        }
        Msg::ProgressReported { session, percent } => {
            if state.is_current(session) {
                state.raise_progress(percent);
            }
            Vec::new()
        }
        Msg::ThumbnailFetched { session, result } => {
            if !state.is_current(session) || state.phase() != Phase::SubmittingThumbnail {
                return (state, Vec::new());
            }
            match result {
                Ok(fetched) => {
                    state.complete_session(fetched.thumbnail_url, fetched.elapsed);
                }
                Err(_detail) => {
                    state.fail_submission(
                        RequestStage::ThumbnailFetch,
                        PROCESSING_ERROR_MESSAGE.into(),
                    );
                }
            }
            Vec::new()
        }
        Msg::GenerateClicked => {
            // No empty-summary special case here: the view model gates the
            // action and the server rejects an empty summary on its own.
            let effect = Effect::GenerateThumbnails {
                summary: state.summary_text().to_owned(),
                video_url: state.input().to_owned(),
                include_human: state.include_human(),
                include_text: state.include_text(),
            };
            state.begin_generation();
            vec![effect]
        }
        Msg::ThumbnailsGenerated { result } => {
            match result {
                Ok(thumbnails) => state.apply_generated(thumbnails),
                // The previous set stays visible on failure.
                Err(_detail) => state.fail_generation(GENERATION_ERROR_MESSAGE.into()),
            }
            Vec::new()
        }
        Msg::DownloadClicked { index } => match state.generated().get(index) {
            Some(url) => vec![Effect::DownloadImage { url: url.clone() }],
            None => Vec::new(),
        },
        Msg::IncludeHumanToggled(on) => {
            state.set_include_human(on);
            Vec::new()
        }
        Msg::IncludeTextToggled(on) => {
            state.set_include_text(on);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
