//! セミナー申込 API の統合テスト
//!
//! ミドルウェアを含むルーター全体をモック依存で駆動する。

mod helpers;

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
    response::Response,
};
use helpers::{ADMIN_ADDRESS, TestApp};
use pretty_assertions::assert_eq;
use seminar_infra::mock::{MockNotificationSender, MockRegistrationRepository};
use tower::ServiceExt;

const ACME_BODY: &str = r#"{
    "company": "Acme K.K.",
    "name": "Taro Yamada",
    "position": "Sales Manager",
    "email": "taro@acme.example.com",
    "phone": "03-1234-5678",
    "challenge": "提案書作成に時間がかかる"
}"#;

fn registration_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/seminar/registrations")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_申込から両方の通知送信までが完了する() {
    // Arrange
    let app = TestApp::default_mocks();

    // Act
    let response = app
        .router
        .oneshot(registration_request(ACME_BODY))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["success"], true);

    let saved = app.repository.registrations();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name().as_str(), "Taro Yamada");

    let emails = app.sender.sent_emails();
    assert_eq!(emails.len(), 2);
    let admin = emails.iter().find(|e| e.to == ADMIN_ADDRESS).unwrap();
    assert!(admin.text_body.contains("提案書作成に時間がかかる"));
    let applicant = emails
        .iter()
        .find(|e| e.to == "taro@acme.example.com")
        .unwrap();
    assert!(applicant.text_body.contains("Taro Yamada 様"));
}

#[tokio::test]
async fn test_管理者通知が拒否されても申込は成功する() {
    // Arrange
    let app = TestApp::new(
        MockRegistrationRepository::new(),
        MockNotificationSender::fail_for(ADMIN_ADDRESS),
    );

    // Act
    let response = app
        .router
        .oneshot(registration_request(ACME_BODY))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.repository.registrations().len(), 1);
    assert_eq!(app.sender.attempts().len(), 2);
    assert_eq!(app.sender.sent_emails().len(), 1);
}

#[tokio::test]
async fn test_不正なメールアドレスは保存も通知も行わない() {
    // Arrange
    let app = TestApp::default_mocks();
    let body = ACME_BODY.replace("taro@acme.example.com", "not-an-email");

    // Act
    let response = app.router.oneshot(registration_request(&body)).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"],
        serde_json::json!({ "email": "有効なメールアドレスを入力してください" })
    );
    assert!(app.repository.registrations().is_empty());
    assert!(app.sender.attempts().is_empty());
}

#[tokio::test]
async fn test_レスポンスにrequest_idが付与される() {
    // Arrange
    let app = TestApp::default_mocks();

    // Act
    let response = app
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    // UUID v7 形式（バージョン桁が 7）
    assert_eq!(request_id.len(), 36);
    assert_eq!(request_id.chars().nth(14), Some('7'));
}

#[tokio::test]
async fn test_クライアントが指定したrequest_idはそのまま返る() {
    // Arrange
    let app = TestApp::default_mocks();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "client-supplied-id")
        .body(Body::empty())
        .unwrap();

    // Act
    let response = app.router.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "client-supplied-id"
    );
}

#[tokio::test]
async fn test_データベースに接続できない場合readinessは503を返す() {
    // Arrange
    let app = TestApp::default_mocks();

    // Act
    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "not_ready");
}
