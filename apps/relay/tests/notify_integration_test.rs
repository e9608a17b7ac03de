//! # Relay 結合テスト
//!
//! `build_app` で組み立てたルーター全体に対してリクエストを送り、
//! ステータス・レスポンスボディ・メール送信の有無を検証する。
//! SMTP 送信は `MockNotificationSender` に差し替える。

use std::{
    io,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use sitewatch_infra::mock::MockNotificationSender;
use sitewatch_relay::{
    app_builder::build_app,
    config::NOTIFICATION_RECIPIENT,
    usecase::EmailDispatcher,
};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

fn test_app(sender: &MockNotificationSender) -> Router {
    let dispatcher = EmailDispatcher::new(Arc::new(sender.clone()), NOTIFICATION_RECIPIENT);
    build_app(dispatcher)
}

fn post_notify(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/notify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ===== GET /health =====

#[tokio::test]
async fn test_healthは200とokを返す() {
    let sender = MockNotificationSender::new();

    let (status, body) = send(
        test_app(&sender),
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
    assert!(sender.sent_emails().is_empty());
}

// ===== POST /notify 正常系 =====

#[tokio::test]
async fn test_notifyは202を返し全フィールドを含むメールを1通送る() {
    let sender = MockNotificationSender::new();
    let payload = json!({
        "client_ip": "1.2.3.4",
        "domain": "example.com",
        "timestamp": "2024-01-01T00:00:00Z",
    });

    let (status, body) = send(test_app(&sender), post_notify(payload.to_string())).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({ "status": "event accepted" }));

    tokio::time::timeout(Duration::from_secs(2), sender.wait_for_attempts(1))
        .await
        .unwrap();
    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, NOTIFICATION_RECIPIENT);
    assert_eq!(sent[0].subject, "Website Access Detected");
    assert!(sent[0].text_body.contains("1.2.3.4"));
    assert!(sent[0].text_body.contains("example.com"));
    assert!(sent[0].text_body.contains("2024-01-01T00:00:00Z"));
}

#[tokio::test]
async fn test_空オブジェクトも受理され欠落フィールドはnoneになる() {
    let sender = MockNotificationSender::new();

    let (status, body) = send(test_app(&sender), post_notify("{}")).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({ "status": "event accepted" }));

    tokio::time::timeout(Duration::from_secs(2), sender.wait_for_attempts(1))
        .await
        .unwrap();
    let text_body = &sender.sent_emails()[0].text_body;
    assert!(text_body.contains("Client IP: None"));
    assert!(text_body.contains("Domain: None"));
    assert!(text_body.contains("Time: None"));
}

#[tokio::test]
async fn test_content_typeがなくても受理される() {
    let sender = MockNotificationSender::new();
    let request = Request::builder()
        .method("POST")
        .uri("/notify")
        .body(Body::from(r#"{"domain":"example.com"}"#))
        .unwrap();

    let (status, _) = send(test_app(&sender), request).await;

    assert_eq!(status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_大きなjsonボディもサイズ上限なしで受理される() {
    let sender = MockNotificationSender::new();
    let payload = json!({
        "domain": "example.com",
        "pad": "x".repeat(3 * 1024 * 1024),
    });

    let (status, body) = send(test_app(&sender), post_notify(payload.to_string())).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({ "status": "event accepted" }));

    tokio::time::timeout(Duration::from_secs(2), sender.wait_for_attempts(1))
        .await
        .unwrap();
    assert!(sender.sent_emails()[0].text_body.contains("Domain: example.com"));
}

// ===== POST /notify 異常系 =====

#[rstest]
#[case::空ボディ("")]
#[case::空白のみ("   ")]
#[case::平文("not json")]
#[case::途中で切れたjson(r#"{"client_ip":"#)]
#[tokio::test]
async fn test_不正なボディは400を返しメールを送らない(#[case] raw: &'static str) {
    let sender = MockNotificationSender::new();

    let (status, body) = send(test_app(&sender), post_notify(raw)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid JSON" }));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sender.sent_emails().is_empty());
}

// ===== Request ID =====

#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される() {
    let sender = MockNotificationSender::new();
    let custom_id = "watcher-request-42";

    let response = test_app(&sender)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/notify")
                .header("x-request-id", custom_id)
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .unwrap()
            .to_str()
            .unwrap(),
        custom_id,
        "クライアント提供の Request ID がそのまま返されること"
    );
}

#[tokio::test]
async fn test_x_request_idがなければ生成して返す() {
    let sender = MockNotificationSender::new();

    let response = test_app(&sender)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response.headers().contains_key("x-request-id"),
        "レスポンスに x-request-id ヘッダーが含まれること"
    );
}

// ===== 送信の非同期性と失敗の封じ込め =====

#[tokio::test]
async fn test_smtpが遅くてもレスポンスは待たされない() {
    let sender = MockNotificationSender::new().with_delay(Duration::from_secs(3));
    let app = test_app(&sender);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let started = Instant::now();
    let response = client
        .post(format!("http://{addr}/notify"))
        .json(&json!({ "client_ip": "1.2.3.4", "domain": "example.com" }))
        .send()
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
    assert!(
        elapsed < Duration::from_secs(1),
        "送信完了を待たずに応答すること: {elapsed:?}"
    );
    assert!(sender.sent_emails().is_empty());
}

#[tokio::test]
async fn test_送信タスクがパニックしてもサーバーは応答を続ける() {
    let sender = MockNotificationSender::new().panicking("smtp client bug");
    let app = test_app(&sender);

    let (status, body) = send(app.clone(), post_notify(r#"{"domain":"example.com"}"#)).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({ "status": "event accepted" }));

    tokio::time::timeout(Duration::from_secs(2), sender.wait_for_attempts(1))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let (status, body) = send(
        app.clone(),
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, _) = send(app, post_notify("{}")).await;
    assert_eq!(status, StatusCode::ACCEPTED);
}

/// fmt レイヤーの出力をメモリに溜める
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_送信失敗でも202を返し失敗がログに残る() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let sender = MockNotificationSender::new().failing("535 authentication failed");

    let (status, body) = send(test_app(&sender), post_notify(r#"{"domain":"example.com"}"#)).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({ "status": "event accepted" }));

    let deadline = Instant::now() + Duration::from_secs(2);
    while !logs.contents().contains("notification.failed") {
        assert!(
            Instant::now() < deadline,
            "送信失敗ログが出力されること: {}",
            logs.contents()
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let output = logs.contents();
    assert!(output.contains("535 authentication failed"), "{output}");
    assert_eq!(sender.sent_emails().len(), 1, "リトライしないこと");
}
