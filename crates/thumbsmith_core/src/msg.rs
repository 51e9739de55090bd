use std::time::Duration;

use crate::SessionId;

/// Successful payload of the current-thumbnail request, including the
/// engine-measured duration of the whole submit cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedThumbnail {
    pub thumbnail_url: String,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL for summarization.
    SubmitClicked,
    /// User toggled the "include human" modifier.
    IncludeHumanToggled(bool),
    /// User toggled the "include text" modifier.
    IncludeTextToggled(bool),
    /// User clicked Generate New Thumbnails.
    GenerateClicked,
    /// User clicked Download on a generated thumbnail card.
    DownloadClicked { index: usize },
    /// Engine completion for the summary request of a session.
    /// The error string is diagnostic detail, already logged.
    SummaryFetched {
        session: SessionId,
        result: Result<String, String>,
    },
    /// Engine progress beat for an in-flight session.
    ProgressReported { session: SessionId, percent: u8 },
    /// Engine completion for the current-thumbnail request of a session.
    ThumbnailFetched {
        session: SessionId,
        result: Result<FetchedThumbnail, String>,
    },
    /// Engine completion for a generation request.
    ThumbnailsGenerated {
        result: Result<Vec<String>, String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
