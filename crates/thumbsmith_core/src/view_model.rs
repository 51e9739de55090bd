use std::time::Duration;

use crate::AppState;

/// Everything a presentation layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub url_error: Option<String>,
    pub loading: bool,
    pub progress: u8,
    pub error: Option<String>,
    pub summary: Option<String>,
    pub current_thumbnail: Option<String>,
    pub elapsed_label: Option<String>,
    pub include_human: bool,
    pub include_text: bool,
    pub can_submit: bool,
    pub can_generate: bool,
    pub generated: Vec<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub(crate) fn project(state: &AppState) -> Self {
        let loading = state.is_loading();
        let summary = non_empty(state.summary_text());
        let current_thumbnail = state
            .session()
            .and_then(|s| non_empty(&s.current_thumbnail));
        let elapsed_label = state
            .session()
            .and_then(|s| s.elapsed)
            .map(format_elapsed);

        Self {
            input: state.input().to_owned(),
            url_error: state.url_error().map(str::to_owned),
            loading,
            progress: state.progress(),
            error: state.error().map(|e| e.message.clone()),
            summary: summary.clone(),
            current_thumbnail,
            elapsed_label,
            include_human: state.include_human(),
            include_text: state.include_text(),
            can_submit: !loading && state.url_error().is_none() && !state.input().is_empty(),
            can_generate: !loading && summary.is_some(),
            generated: state.generated().to_vec(),
            dirty: state.is_dirty(),
        }
    }
}

/// Formats a cycle duration as `Xm YYs`, seconds rounded and zero-padded.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64().round() as u64;
    let mins = total / 60;
    let secs = total % 60;
    format!("{mins}m {secs:02}s")
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::format_elapsed;
    use std::time::Duration;

    #[test]
    fn elapsed_rounds_and_pads_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs_f64(4.4)), "0m 04s");
        assert_eq!(format_elapsed(Duration::from_secs_f64(4.6)), "0m 05s");
        assert_eq!(format_elapsed(Duration::from_secs(60)), "1m 00s");
        assert_eq!(format_elapsed(Duration::from_secs(135)), "2m 15s");
    }
}
