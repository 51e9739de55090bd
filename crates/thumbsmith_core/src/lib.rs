//! Thumbsmith core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use msg::{FetchedThumbnail, Msg};
pub use state::{AppState, Phase, RequestError, RequestStage, SessionId, SummarySession};
pub use update::{update, GENERATION_ERROR_MESSAGE, PROCESSING_ERROR_MESSAGE};
pub use validate::{validate, UrlFormat, ValidationResult, VideoRef, URL_ERROR_MESSAGE};
pub use view_model::{format_elapsed, AppViewModel};
