//! YouTube URL classification.
//!
//! Four URL shapes are recognized, tried in a fixed order so that the
//! first structural match wins: standard watch page, shortened share
//! link, embed link, mobile watch page. Each shape must carry an
//! 11-character video id drawn from `[A-Za-z0-9_-]`. No network or
//! existence check is performed.

/// User-visible message for any rejected input.
pub const URL_ERROR_MESSAGE: &str = "Invalid YouTube URL. Please enter a valid YouTube video URL.";

const VIDEO_ID_LEN: usize = 11;

/// Originating shape of a recognized YouTube URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlFormat {
    Standard,
    Shortened,
    Embedded,
    Mobile,
}

/// A validated video reference: the canonical id plus the raw input and
/// the shape it matched. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    pub raw_url: String,
    pub video_id: String,
    pub format: UrlFormat,
}

/// Outcome of classifying user input. Never partially valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(VideoRef),
    Invalid { reason: String },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }
}

/// Matcher/extractor pairs in priority order.
const MATCHERS: &[(UrlFormat, fn(&str) -> Option<String>)] = &[
    (UrlFormat::Standard, match_standard),
    (UrlFormat::Shortened, match_shortened),
    (UrlFormat::Embedded, match_embedded),
    (UrlFormat::Mobile, match_mobile),
];

/// Classifies `input` as a YouTube video reference. Pure function.
pub fn validate(input: &str) -> ValidationResult {
    // The recognized shapes are single non-whitespace runs, so any
    // whitespace (and the empty string) is rejected outright.
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return invalid();
    }

    for (format, matcher) in MATCHERS {
        if let Some(video_id) = matcher(input) {
            return ValidationResult::Valid(VideoRef {
                raw_url: input.to_string(),
                video_id,
                format: *format,
            });
        }
    }

    invalid()
}

fn invalid() -> ValidationResult {
    ValidationResult::Invalid {
        reason: URL_ERROR_MESSAGE.to_string(),
    }
}

/// `https://www.youtube.com/watch?v=VIDEO_ID` (scheme and `www.` optional).
fn match_standard(input: &str) -> Option<String> {
    let rest = strip_scheme(input);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let query = rest.strip_prefix("youtube.com/watch?")?;
    extract_watch_id(query)
}

/// `https://youtu.be/VIDEO_ID` (scheme and `www.` optional).
fn match_shortened(input: &str) -> Option<String> {
    let rest = strip_scheme(input);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    take_video_id(rest.strip_prefix("youtu.be/")?)
}

/// `https://www.youtube.com/embed/VIDEO_ID` (scheme and `www.` optional).
fn match_embedded(input: &str) -> Option<String> {
    let rest = strip_scheme(input);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    take_video_id(rest.strip_prefix("youtube.com/embed/")?)
}

/// `https://m.youtube.com/watch?v=VIDEO_ID` (scheme and `m.` optional).
fn match_mobile(input: &str) -> Option<String> {
    let rest = strip_scheme(input);
    let rest = rest.strip_prefix("m.").unwrap_or(rest);
    let query = rest.strip_prefix("youtube.com/watch?")?;
    extract_watch_id(query)
}

fn strip_scheme(input: &str) -> &str {
    input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input)
}

/// Finds the video id in a watch-page query string. The id may be carried
/// by any `v=` occurrence; the last one that yields a full-length id wins.
fn extract_watch_id(query: &str) -> Option<String> {
    query
        .match_indices("v=")
        .filter_map(|(pos, _)| take_video_id(&query[pos + 2..]))
        .last()
}

/// Takes exactly [`VIDEO_ID_LEN`] id characters from the front of `rest`.
/// Trailing characters beyond the id are allowed and ignored.
fn take_video_id(rest: &str) -> Option<String> {
    let id: String = rest.chars().take(VIDEO_ID_LEN).collect();
    if id.chars().count() == VIDEO_ID_LEN && id.chars().all(is_id_char) {
        Some(id)
    } else {
        None
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
