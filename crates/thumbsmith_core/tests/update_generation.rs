use std::sync::Once;
use std::time::Duration;

use thumbsmith_core::{
    update, AppState, Effect, FetchedThumbnail, Msg, GENERATION_ERROR_MESSAGE,
};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

/// Drives a full successful submission so a summary is available.
fn ready_state(summary: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::InputChanged(WATCH_URL.to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SummaryFetched {
            session: 1,
            result: Ok(summary.to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::ThumbnailFetched {
            session: 1,
            result: Ok(FetchedThumbnail {
                thumbnail_url: "https://img.example/current.jpg".to_string(),
                elapsed: Duration::from_secs(3),
            }),
        },
    );
    state
}

#[test]
fn generate_carries_summary_and_modifiers() {
    init_logging();
    let state = ready_state("A summary.");
    let (state, _) = update(state, Msg::IncludeHumanToggled(true));
    let (state, _) = update(state, Msg::IncludeTextToggled(true));
    let (state, _) = update(state, Msg::IncludeTextToggled(false));

    let (state, effects) = update(state, Msg::GenerateClicked);

    assert_eq!(
        effects,
        vec![Effect::GenerateThumbnails {
            summary: "A summary.".to_string(),
            video_url: WATCH_URL.to_string(),
            include_human: true,
            include_text: false,
        }]
    );
    assert!(state.view().loading);
}

#[test]
fn generate_does_not_special_case_empty_summary() {
    init_logging();
    // Not reachable through the view (can_generate is false), but the
    // orchestration itself delegates the empty case to the server.
    let (state, _) = update(AppState::new(), Msg::InputChanged(WATCH_URL.to_string()));
    assert!(!state.view().can_generate);

    let (_, effects) = update(state, Msg::GenerateClicked);
    assert_eq!(
        effects,
        vec![Effect::GenerateThumbnails {
            summary: String::new(),
            video_url: WATCH_URL.to_string(),
            include_human: false,
            include_text: false,
        }]
    );
}

#[test]
fn success_replaces_the_whole_set_in_server_order() {
    init_logging();
    let state = ready_state("A summary.");
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, _) = update(
        state,
        Msg::ThumbnailsGenerated {
            result: Ok(vec!["a.png".to_string(), "b.png".to_string()]),
        },
    );
    assert_eq!(state.view().generated, vec!["a.png", "b.png"]);

    // A second pass replaces, never appends.
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, _) = update(
        state,
        Msg::ThumbnailsGenerated {
            result: Ok(vec!["c.png".to_string()]),
        },
    );
    assert_eq!(state.view().generated, vec!["c.png"]);
    assert!(!state.view().loading);
}

#[test]
fn failure_keeps_previous_set_and_reports_error() {
    init_logging();
    let state = ready_state("A summary.");
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, _) = update(
        state,
        Msg::ThumbnailsGenerated {
            result: Ok(vec!["a.png".to_string()]),
        },
    );

    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, _) = update(
        state,
        Msg::ThumbnailsGenerated {
            result: Err("http status 502".to_string()),
        },
    );
    let view = state.view();

    assert_eq!(view.error.as_deref(), Some(GENERATION_ERROR_MESSAGE));
    assert_eq!(view.generated, vec!["a.png"]);
    assert!(!view.loading);

    // Starting the next generation request clears the stale error.
    let (state, _) = update(state, Msg::GenerateClicked);
    assert_eq!(state.view().error, None);
}

#[test]
fn each_generated_entry_downloads_unmodified() {
    init_logging();
    let state = ready_state("A summary.");
    let (state, _) = update(state, Msg::GenerateClicked);
    let thumbnails = vec![
        "https://img.example/gen-0.png".to_string(),
        "https://img.example/gen-1.png".to_string(),
        "https://img.example/gen-2.png".to_string(),
    ];
    let (state, _) = update(
        state,
        Msg::ThumbnailsGenerated {
            result: Ok(thumbnails.clone()),
        },
    );

    for (index, url) in thumbnails.iter().enumerate() {
        let (_, effects) = update(state.clone(), Msg::DownloadClicked { index });
        assert_eq!(effects, vec![Effect::DownloadImage { url: url.clone() }]);
    }

    // Out-of-range index is a no-op.
    let (_, effects) = update(state, Msg::DownloadClicked { index: 3 });
    assert!(effects.is_empty());
}
