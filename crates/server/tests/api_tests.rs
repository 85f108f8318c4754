//! HTTP API integration tests
use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Html;
use axum::routing::get;
use kindler_core::{
    Converter, FetchConfig, Kindler, KindlerError, Mailer, Result, SmtpConfig, SmtpMailer, WorkDir, epub_path,
};
use kindler_server::{ErrorBody, StatusResponse, router};
use tempfile::TempDir;
use tower::ServiceExt;

const ARTICLE: &str = "<html><head><title>Why Rust?</title></head><body><p>Because.</p></body></html>";

struct FakeConverter;

impl Converter for FakeConverter {
    async fn convert(&self, html: &Path) -> Result<PathBuf> {
        let out = epub_path(html);
        std::fs::write(&out, b"PK fake epub")?;
        Ok(out)
    }
}

struct FailingConverter;

impl Converter for FailingConverter {
    async fn convert(&self, _html: &Path) -> Result<PathBuf> {
        Err(KindlerError::ConverterUnavailable {
            program: "pandoc".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}

struct OkMailer;

impl Mailer for OkMailer {
    async fn send(&self, attachment: &Path) -> Result<()> {
        assert!(attachment.exists());
        Ok(())
    }
}

async fn closed_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

async fn serve_article() -> String {
    let app = Router::new().route("/post", get(|| async { Html(ARTICLE) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}/post")
}

fn app<C: Converter + 'static, M: Mailer + 'static>(tmp: &TempDir, converter: C, mailer: M) -> Router {
    let workdir = WorkDir::open(tmp.path()).unwrap();
    let fetch = FetchConfig { timeout: 5, ..Default::default() };
    router(Kindler::new(workdir, fetch, converter, mailer))
}

fn send_request(url: &str) -> Request<Body> {
    let body = serde_json::json!({ "url": url }).to_string();
    Request::builder()
        .method("POST")
        .uri("/send-article")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn cleanup_request() -> Request<Body> {
    Request::builder().method("POST").uri("/cleanup").body(Body::empty()).unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn test_send_article_success() {
    let url = serve_article().await;
    let tmp = TempDir::new().unwrap();

    let response = app(&tmp, FakeConverter, OkMailer).oneshot(send_request(&url)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: StatusResponse = body_json(response).await;
    assert_eq!(body.status, "success");
    assert_eq!(body.message, "Article 'Why_Rust' sent to Kindle.");
}

#[tokio::test]
async fn test_unreachable_url_is_bad_request() {
    let port = closed_port().await;
    let tmp = TempDir::new().unwrap();

    let response = app(&tmp, FakeConverter, OkMailer)
        .oneshot(send_request(&format!("http://127.0.0.1:{port}/post")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(response).await;
    assert_eq!(body.detail, "Failed to download HTML content.");
    assert_eq!(file_count(tmp.path()), 0);
}

#[tokio::test]
async fn test_failing_converter_is_server_error() {
    let url = serve_article().await;
    let tmp = TempDir::new().unwrap();

    let response = app(&tmp, FailingConverter, OkMailer).oneshot(send_request(&url)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = body_json(response).await;
    assert_eq!(body.detail, "Failed to convert HTML to EPUB.");
    assert!(tmp.path().join("Why_Rust.html").exists());
}

#[tokio::test]
async fn test_mail_failure_is_server_error() {
    let url = serve_article().await;
    let tmp = TempDir::new().unwrap();

    let mailer = SmtpMailer::new(&SmtpConfig {
        host: "127.0.0.1".to_string(),
        port: closed_port().await,
        sender: "me@example.com".to_string(),
        password: "secret".to_string(),
        sender_name: "Kindler".to_string(),
        recipient: "reader@kindle.com".to_string(),
    })
    .unwrap();

    let response = app(&tmp, FakeConverter, mailer).oneshot(send_request(&url)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = body_json(response).await;
    assert_eq!(body.detail, "Failed to send EPUB file to Kindle.");
}

#[tokio::test]
async fn test_invalid_url_is_unprocessable() {
    let tmp = TempDir::new().unwrap();

    for url in ["not a url", "ftp://example.com/file"] {
        let response = app(&tmp, FakeConverter, OkMailer).oneshot(send_request(url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
    assert_eq!(file_count(tmp.path()), 0);
}

#[tokio::test]
async fn test_missing_url_field_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/send-article")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"link": "https://example.com"}"#))
        .unwrap();

    let response = app(&tmp, FakeConverter, OkMailer).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = body_json(response).await;
    assert!(body.detail.contains("url"), "unexpected detail {:?}", body.detail);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let tmp = TempDir::new().unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/send-article")
        .header("content-type", "application/json")
        .body(Body::from("{\"url\": "))
        .unwrap();

    let response = app(&tmp, FakeConverter, OkMailer).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = body_json(response).await;
    assert!(!body.detail.is_empty());
    assert_eq!(file_count(tmp.path()), 0);
}

#[tokio::test]
async fn test_cleanup_removes_all_files() {
    let tmp = TempDir::new().unwrap();
    for name in ["a.html", "a.epub", "b.html"] {
        std::fs::write(tmp.path().join(name), "x").unwrap();
    }

    let response = app(&tmp, FakeConverter, OkMailer).oneshot(cleanup_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: StatusResponse = body_json(response).await;
    assert_eq!(body.status, "success");
    assert_eq!(file_count(tmp.path()), 0);
}

#[tokio::test]
async fn test_cleanup_missing_directory_is_server_error() {
    let tmp = TempDir::new().unwrap();
    let app = app(&tmp, FakeConverter, OkMailer);
    std::fs::remove_dir(tmp.path()).unwrap();

    let response = app.oneshot(cleanup_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = body_json(response).await;
    assert_eq!(body.detail, "Failed to clean up files.");
}

#[tokio::test]
async fn test_unknown_route() {
    let tmp = TempDir::new().unwrap();
    let request = Request::builder().method("POST").uri("/nope").body(Body::empty()).unwrap();

    let response = app(&tmp, FakeConverter, OkMailer).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
