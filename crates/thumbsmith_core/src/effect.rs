use crate::SessionId;

/// Side effects requested by [`crate::update`]; executed by the embedder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchSummary {
        session: SessionId,
        video_url: String,
        video_id: String,
    },
    FetchCurrentThumbnail {
        session: SessionId,
        video_url: String,
        video_id: String,
    },
    GenerateThumbnails {
        summary: String,
        video_url: String,
        include_human: bool,
        include_text: bool,
    },
    DownloadImage {
        url: String,
    },
}
