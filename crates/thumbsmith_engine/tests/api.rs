use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use thumbsmith_engine::{
    ApiSettings, Backend, EngineEvent, FailureKind, ProgressSink, ReqwestBackend,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
const VIDEO_ID: &str = "dQw4w9WgXcQ";

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn new() -> Self {
        Self::default()
    }

    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn backend_for(server: &MockServer) -> ReqwestBackend {
    ReqwestBackend::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
}

#[tokio::test]
async fn summarize_posts_exact_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "video_url": WATCH_URL,
            "video_id": VIDEO_ID,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": "A video about things.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let summary = backend
        .summarize(WATCH_URL, VIDEO_ID)
        .await
        .expect("summarize ok");
    assert_eq!(summary, "A video about things.");
}

#[tokio::test]
async fn summarize_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend.summarize(WATCH_URL, VIDEO_ID).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn summarize_times_out_when_a_deadline_is_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "summary": "slow" })),
        )
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..ApiSettings::default()
    });
    let err = backend.summarize(WATCH_URL, VIDEO_ID).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn summarize_rejects_a_body_without_the_summary_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": 1 })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend.summarize(WATCH_URL, VIDEO_ID).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn current_thumbnail_emits_the_75_percent_beat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_current_thumbnail"))
        .and(body_json(json!({
            "video_url": WATCH_URL,
            "video_id": VIDEO_ID,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "thumbnail_url": "https://img.youtube.com/vi/dQw4w9WgXcQ/hq720.jpg",
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let sink = TestSink::new();
    let thumbnail_url = backend
        .current_thumbnail(9, WATCH_URL, VIDEO_ID, &sink)
        .await
        .expect("thumbnail ok");

    assert_eq!(
        thumbnail_url,
        "https://img.youtube.com/vi/dQw4w9WgXcQ/hq720.jpg"
    );
    assert_eq!(
        sink.take(),
        vec![EngineEvent::Progress {
            session: 9,
            percent: 75,
        }]
    );
}

#[tokio::test]
async fn current_thumbnail_failure_emits_no_beat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get_current_thumbnail"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let sink = TestSink::new();
    let err = backend
        .current_thumbnail(3, WATCH_URL, VIDEO_ID, &sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn generate_sends_camel_case_modifiers_and_keeps_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_thumbnails"))
        .and(body_json(json!({
            "summary": "A video about things.",
            "video_url": WATCH_URL,
            "includeHuman": true,
            "includeText": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "thumbnails": ["b.png", "a.png", "c.png"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let thumbnails = backend
        .generate_thumbnails("A video about things.", WATCH_URL, true, false)
        .await
        .expect("generate ok");
    assert_eq!(thumbnails, vec!["b.png", "a.png", "c.png"]);
}

#[tokio::test]
async fn generate_delegates_empty_summary_to_the_server() {
    let server = MockServer::start().await;
    // The backend client forwards the empty summary untouched; this
    // server rejects it, and the client reports the status as-is.
    Mock::given(method("POST"))
        .and(path("/generate_thumbnails"))
        .and(body_json(json!({
            "summary": "",
            "video_url": WATCH_URL,
            "includeHuman": false,
            "includeText": false,
        })))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend
        .generate_thumbnails("", WATCH_URL, false, false)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
}
