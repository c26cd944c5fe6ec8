//! SendGridNotificationSender 統合テスト
//!
//! ローカルに起動したスタブサーバーに対して実際に HTTP リクエストを送信し、
//! 認証ヘッダーとリクエストボディを検証する。

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use pretty_assertions::assert_eq;
use seminar_domain::notification::{EmailMessage, NotificationError};
use seminar_infra::notification::{NotificationSender, SendGridNotificationSender};
use serde_json::{Value, json};

/// スタブサーバーが受け取ったリクエスト
#[derive(Debug, Clone)]
struct CapturedRequest {
    authorization: Option<String>,
    body:          Value,
}

#[derive(Clone)]
struct StubState {
    status:   StatusCode,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn mail_send(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, &'static str) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.captured.lock().unwrap().push(CapturedRequest {
        authorization,
        body,
    });

    if state.status == StatusCode::ACCEPTED {
        (state.status, "")
    } else {
        (state.status, r#"{"errors":[{"message":"stub error"}]}"#)
    }
}

/// 指定ステータスを返すスタブサーバーを起動し、URL と受信記録を返す
async fn spawn_stub(status: StatusCode) -> (String, Arc<Mutex<Vec<CapturedRequest>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v3/mail/send", post(mail_send))
        .with_state(StubState {
            status,
            captured: captured.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v3/mail/send"), captured)
}

fn make_email() -> EmailMessage {
    EmailMessage {
        to:        "taro@acme.example.com".to_string(),
        subject:   "【登録完了】Gemini活用セミナー 営業改革シリーズ".to_string(),
        html_body: "<p>Taro Yamada 様</p>".to_string(),
        text_body: "Taro Yamada 様".to_string(),
    }
}

#[tokio::test]
async fn test_202が返ると送信成功になる() {
    let (url, captured) = spawn_stub(StatusCode::ACCEPTED).await;
    let sut = SendGridNotificationSender::new(
        url,
        Some("SG.test-key".to_string()),
        "noreply@anyenv-inc.com".to_string(),
    );

    let result = sut.send_email(&make_email()).await;

    assert!(result.is_ok());
    let captured = captured.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(
        captured[0].authorization.as_deref(),
        Some("Bearer SG.test-key")
    );
    assert_eq!(
        captured[0].body,
        json!({
            "personalizations": [{ "to": [{ "email": "taro@acme.example.com" }] }],
            "from": { "email": "noreply@anyenv-inc.com" },
            "subject": "【登録完了】Gemini活用セミナー 営業改革シリーズ",
            "content": [
                { "type": "text/plain", "value": "Taro Yamada 様" },
                { "type": "text/html", "value": "<p>Taro Yamada 様</p>" }
            ]
        })
    );
}

#[tokio::test]
async fn test_エラーステータスが返ると拒否エラーになる() {
    let (url, captured) = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR).await;
    let sut = SendGridNotificationSender::new(
        url,
        Some("SG.test-key".to_string()),
        "noreply@anyenv-inc.com".to_string(),
    );

    let result = sut.send_email(&make_email()).await;

    assert_eq!(
        result,
        Err(NotificationError::Rejected {
            status: 500,
            body:   r#"{"errors":[{"message":"stub error"}]}"#.to_string(),
        })
    );
    assert_eq!(captured.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_apiキー未設定の場合はリクエストを送らない() {
    let (url, captured) = spawn_stub(StatusCode::ACCEPTED).await;
    let sut = SendGridNotificationSender::new(url, None, "noreply@anyenv-inc.com".to_string());

    let result = sut.send_email(&make_email()).await;

    assert_eq!(result, Err(NotificationError::CredentialMissing));
    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_接続できない場合は送信失敗エラーになる() {
    // バインドしたポートを即座に解放し、接続拒否になる URL を得る
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sut = SendGridNotificationSender::new(
        format!("http://{addr}/v3/mail/send"),
        Some("SG.test-key".to_string()),
        "noreply@anyenv-inc.com".to_string(),
    );

    let result = sut.send_email(&make_email()).await;

    assert!(matches!(result, Err(NotificationError::SendFailed(_))));
}
