//! Integration tests for the direct upload client against a mock backend.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mockito::Matcher;
use osspost::{OssConfig, UploadClient, UploadError, UploadProgress};

/// Counts progress edges so tests can assert exactly-once semantics.
#[derive(Default)]
struct ProgressRecorder {
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl UploadProgress for ProgressRecorder {
    fn started(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn finished(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

fn test_config(host: &str) -> OssConfig {
    OssConfig::new("test-bucket", "test-access-id", "test-secret", host).unwrap()
}

fn temp_source_file(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("osspost-test")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content).unwrap();
    file
}

#[tokio::test]
async fn test_upload_success_resolves_url_from_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="key""#.to_string()),
            Matcher::Regex(r#"name="policy""#.to_string()),
            Matcher::Regex(r#"name="OSSAccessKeyId""#.to_string()),
            Matcher::Regex("test-access-id".to_string()),
            Matcher::Regex(r#"name="success_action_status""#.to_string()),
            Matcher::Regex(r#"name="signature""#.to_string()),
            Matcher::Regex(r#"name="file""#.to_string()),
        ]))
        .with_status(200)
        .create_async()
        .await;

    let file = temp_source_file(".jpg", b"jpeg bytes");
    let progress = Arc::new(ProgressRecorder::default());
    let client = UploadClient::new(test_config(&server.url()))
        .unwrap()
        .with_progress(progress.clone());

    let outcome = client
        .upload(file.path().to_str().unwrap(), true)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        outcome.url,
        format!("{}/{}", server.url(), outcome.object_key)
    );
    assert!(outcome.object_key.starts_with("App/"));
    assert!(outcome.object_key.ends_with(".jpg"));
    assert_eq!(outcome.status, 200);
    assert_eq!(progress.started.load(Ordering::SeqCst), 1);
    assert_eq!(progress.finished.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rejected_upload_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(403)
        .with_body("AccessDenied")
        .create_async()
        .await;

    let file = temp_source_file(".png", b"png bytes");
    let progress = Arc::new(ProgressRecorder::default());
    let client = UploadClient::new(test_config(&server.url()))
        .unwrap()
        .with_progress(progress.clone());

    let err = client
        .upload(file.path().to_str().unwrap(), true)
        .await
        .unwrap_err();

    match err {
        UploadError::Rejected { status, body } => {
            assert_eq!(status.as_u16(), 403);
            assert!(body.contains("AccessDenied"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    // The indicator is hidden exactly once on the failure path too.
    assert_eq!(progress.started.load(Ordering::SeqCst), 1);
    assert_eq!(progress.finished.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_transport_failure_is_tagged() {
    // Nothing listens on the target port.
    let file = temp_source_file(".jpg", b"jpeg bytes");
    let progress = Arc::new(ProgressRecorder::default());
    let client = UploadClient::new(test_config("http://127.0.0.1:9"))
        .unwrap()
        .with_progress(progress.clone());

    let err = client
        .upload(file.path().to_str().unwrap(), true)
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Transport(_)));
    assert_eq!(progress.started.load(Ordering::SeqCst), 1);
    assert_eq!(progress.finished.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_source_file_fails_before_progress() {
    let progress = Arc::new(ProgressRecorder::default());
    let client = UploadClient::new(test_config("http://127.0.0.1:9"))
        .unwrap()
        .with_progress(progress.clone());

    let err = client.upload("/nonexistent/photo.jpg", true).await.unwrap_err();

    assert!(matches!(err, UploadError::Source { .. }));
    assert_eq!(progress.started.load(Ordering::SeqCst), 0);
    assert_eq!(progress.finished.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_show_progress_false_skips_hook() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .create_async()
        .await;

    let file = temp_source_file(".jpg", b"jpeg bytes");
    let progress = Arc::new(ProgressRecorder::default());
    let client = UploadClient::new(test_config(&server.url()))
        .unwrap()
        .with_progress(progress.clone());

    client
        .upload(file.path().to_str().unwrap(), false)
        .await
        .unwrap();

    assert_eq!(progress.started.load(Ordering::SeqCst), 0);
    assert_eq!(progress.finished.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_concurrent_uploads_derive_distinct_keys() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .expect_at_least(2)
        .create_async()
        .await;

    let file_a = temp_source_file(".jpg", b"a");
    let file_b = temp_source_file(".png", b"b");
    let client = UploadClient::new(test_config(&server.url())).unwrap();

    let (a, b) = tokio::join!(
        client.upload(file_a.path().to_str().unwrap(), false),
        client.upload(file_b.path().to_str().unwrap(), false),
    );

    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.object_key, b.object_key);
    assert!(a.object_key.ends_with(".jpg"));
    assert!(b.object_key.ends_with(".png"));
}
