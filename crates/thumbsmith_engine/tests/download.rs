use std::fs;

use thumbsmith_engine::{DownloadError, FailureKind, ImageDownloader};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IMAGE_BYTES: &[u8] = b"\xff\xd8\xff\xe0 not really a jpeg";

#[tokio::test]
async fn saves_image_under_timestamped_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gen-0.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(IMAGE_BYTES, "image/jpeg"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let downloader = ImageDownloader::new(dir.path().to_path_buf());
    let url = format!("{}/gen-0.jpg", server.uri());

    let saved = downloader
        .download(&url, 1700000000000)
        .await
        .expect("download ok");

    assert_eq!(saved, dir.path().join("thumbnail_1700000000000.jpg"));
    assert_eq!(fs::read(&saved).expect("read saved file"), IMAGE_BYTES);
}

#[tokio::test]
async fn repeated_download_replaces_the_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gen-0.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(IMAGE_BYTES, "image/jpeg"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let downloader = ImageDownloader::new(dir.path().to_path_buf());
    let url = format!("{}/gen-0.jpg", server.uri());

    let first = downloader.download(&url, 42).await.expect("first download");
    let second = downloader.download(&url, 42).await.expect("second download");
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).expect("read saved file"), IMAGE_BYTES);
}

#[tokio::test]
async fn reports_http_status_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let downloader = ImageDownloader::new(dir.path().to_path_buf());
    let url = format!("{}/missing.jpg", server.uri());

    let err = downloader.download(&url, 1).await.unwrap_err();
    match err {
        DownloadError::Api(api) => assert_eq!(api.kind, FailureKind::HttpStatus(404)),
        other => panic!("unexpected error: {other}"),
    }
}
