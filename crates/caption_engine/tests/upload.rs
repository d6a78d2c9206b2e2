use std::io::Write;
use std::time::Duration;

use caption_engine::{
    FailureKind, ImageSource, ReqwestUploader, UploadSettings, Uploader,
};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestImage {
    // Keeps the file alive for the duration of the test.
    _file: NamedTempFile,
    source: ImageSource,
}

fn test_image(contents: &[u8]) -> TestImage {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents).expect("write image bytes");
    let source = ImageSource {
        path: file.path().to_path_buf(),
        file_name: "photo.png".to_string(),
        mime: "image/png".to_string(),
    };
    TestImage {
        _file: file,
        source,
    }
}

fn uploader_for(server: &MockServer) -> ReqwestUploader {
    ReqwestUploader::new(UploadSettings {
        endpoint: format!("{}/caption", server.uri()),
        ..UploadSettings::default()
    })
}

#[tokio::test]
async fn upload_posts_multipart_and_returns_caption() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/caption"))
        .and(query_param("method", "beam"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"photo.png\""))
        .and(body_string_contains("fake png bytes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "caption": "a dog" })),
        )
        .mount(&server)
        .await;

    let image = test_image(b"fake png bytes");
    let output = uploader_for(&server)
        .upload(1, &image.source, "beam")
        .await
        .expect("upload ok");

    assert_eq!(output.caption, Some("a dog".to_string()));
}

#[tokio::test]
async fn greedy_method_is_passed_through_as_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/caption"))
        .and(query_param("method", "greedy"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "caption": "a cat" })),
        )
        .mount(&server)
        .await;

    let image = test_image(b"bytes");
    let output = uploader_for(&server)
        .upload(2, &image.source, "greedy")
        .await
        .expect("upload ok");

    assert_eq!(output.caption, Some("a cat".to_string()));
}

#[tokio::test]
async fn empty_caption_field_is_normalized_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/caption"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "caption": "" })),
        )
        .mount(&server)
        .await;

    let image = test_image(b"bytes");
    let output = uploader_for(&server)
        .upload(3, &image.source, "beam")
        .await
        .expect("upload ok");

    assert_eq!(output.caption, None);
}

#[tokio::test]
async fn missing_caption_field_is_normalized_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/caption"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let image = test_image(b"bytes");
    let output = uploader_for(&server)
        .upload(4, &image.source, "beam")
        .await
        .expect("upload ok");

    assert_eq!(output.caption, None);
}

#[tokio::test]
async fn non_2xx_status_fails_with_status_and_body_in_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/caption"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model exploded"))
        .mount(&server)
        .await;

    let image = test_image(b"bytes");
    let err = uploader_for(&server)
        .upload(5, &image.source, "beam")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(err.message.contains("500"));
    assert!(err.message.contains("model exploded"));
}

#[tokio::test]
async fn connection_failure_maps_to_network() {
    // Nothing listens here; the connection attempt itself fails.
    let uploader = ReqwestUploader::new(UploadSettings {
        endpoint: "http://127.0.0.1:9/caption".to_string(),
        ..UploadSettings::default()
    });

    let image = test_image(b"bytes");
    let err = uploader.upload(6, &image.source, "beam").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn non_json_success_body_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/caption"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let image = test_image(b"bytes");
    let err = uploader_for(&server)
        .upload(7, &image.source, "beam")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn unreadable_image_file_fails_before_any_request() {
    let server = MockServer::start().await;
    // No mock mounted: a request reaching the server would 404, not FileRead.

    let source = ImageSource {
        path: "/nonexistent/photo.png".into(),
        file_name: "photo.png".to_string(),
        mime: "image/png".to_string(),
    };
    let err = uploader_for(&server)
        .upload(8, &source, "beam")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::FileRead);
}

#[tokio::test]
async fn request_timeout_applies_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/caption"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({ "caption": "late" })),
        )
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(UploadSettings {
        endpoint: format!("{}/caption", server.uri()),
        request_timeout: Some(Duration::from_millis(50)),
        ..UploadSettings::default()
    });

    let image = test_image(b"bytes");
    let err = uploader.upload(9, &image.source, "beam").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}
