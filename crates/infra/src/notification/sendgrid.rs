//! SendGrid 通知送信実装
//!
//! SendGrid v3 Mail Send API を使用してメールを送信する。
//! 本番環境で使用する。
//!
//! API キーが未設定の場合、送信は行わずに [`NotificationError::CredentialMissing`]
//! を返す。起動は妨げない。

use async_trait::async_trait;
use seminar_domain::notification::{EmailMessage, NotificationError};
use serde::Serialize;

use super::NotificationSender;

/// SendGrid Mail Send API のデフォルトエンドポイント
pub const DEFAULT_SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// SendGrid 通知送信
///
/// `reqwest::Client` をラップする。送信は 1 通につき 1 リクエスト。
#[derive(Clone)]
pub struct SendGridNotificationSender {
    client:       reqwest::Client,
    api_url:      String,
    api_key:      Option<String>,
    from_address: String,
}

impl std::fmt::Debug for SendGridNotificationSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridNotificationSender")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("from_address", &self.from_address)
            .finish_non_exhaustive()
    }
}

impl SendGridNotificationSender {
    /// 新しい SendGrid 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `api_url`: Mail Send API の URL（通常は [`DEFAULT_SENDGRID_API_URL`]）
    /// - `api_key`: SendGrid API キー。空白のみの場合は未設定として扱う
    /// - `from_address`: 送信元メールアドレス（SendGrid で認証済みであること）
    pub fn new(api_url: impl Into<String>, api_key: Option<String>, from_address: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            from_address,
        }
    }
}

/// Mail Send API のリクエストボディ
#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from:             Address<'a>,
    subject:          &'a str,
    /// SendGrid は text/plain を text/html より前に置くことを要求する
    content:          [Content<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value:        &'a str,
}

impl<'a> MailSendRequest<'a> {
    fn new(email: &'a EmailMessage, from_address: &'a str) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address { email: &email.to }],
            }],
            from: Address {
                email: from_address,
            },
            subject: &email.subject,
            content: [
                Content {
                    content_type: "text/plain",
                    value:        &email.text_body,
                },
                Content {
                    content_type: "text/html",
                    value:        &email.html_body,
                },
            ],
        }
    }
}

/// SendGrid のレスポンスを送信結果に変換する
///
/// 送信受付は 202 Accepted のみ。それ以外はボディを添えて `Rejected` とする。
async fn handle_response(response: reqwest::Response) -> Result<(), NotificationError> {
    let status = response.status();
    if status == reqwest::StatusCode::ACCEPTED {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(NotificationError::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl NotificationSender for SendGridNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(NotificationError::CredentialMissing);
        };

        let request = MailSendRequest::new(email, &self.from_address);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SendGrid 送信失敗: {e}")))?;

        handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn make_email() -> EmailMessage {
        EmailMessage {
            to:        "taro@acme.example.com".to_string(),
            subject:   "件名".to_string(),
            html_body: "<p>本文</p>".to_string(),
            text_body: "本文".to_string(),
        }
    }

    fn make_response(status: u16, body: &str) -> reqwest::Response {
        let http_resp = http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap();
        reqwest::Response::from(http_resp)
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SendGridNotificationSender>();
    }

    #[test]
    fn リクエストボディがsendgridの形式でシリアライズされる() {
        let email = make_email();
        let request = MailSendRequest::new(&email, "noreply@anyenv-inc.com");

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "personalizations": [{ "to": [{ "email": "taro@acme.example.com" }] }],
                "from": { "email": "noreply@anyenv-inc.com" },
                "subject": "件名",
                "content": [
                    { "type": "text/plain", "value": "本文" },
                    { "type": "text/html", "value": "<p>本文</p>" }
                ]
            })
        );
    }

    #[tokio::test]
    async fn ステータス202は成功として扱う() {
        let result = handle_response(make_response(202, "")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn ステータス200も202以外なので拒否として扱う() {
        let result = handle_response(make_response(200, "")).await;
        assert_eq!(
            result,
            Err(NotificationError::Rejected {
                status: 200,
                body:   String::new(),
            })
        );
    }

    #[tokio::test]
    async fn エラーステータスはボディを保持して拒否として扱う() {
        let body = r#"{"errors":[{"message":"forbidden"}]}"#;
        let result = handle_response(make_response(403, body)).await;
        assert_eq!(
            result,
            Err(NotificationError::Rejected {
                status: 403,
                body:   body.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn apiキー未設定の場合は送信せずにエラーを返す() {
        let sender = SendGridNotificationSender::new(
            "http://127.0.0.1:9/v3/mail/send",
            None,
            "noreply@anyenv-inc.com".to_string(),
        );

        let result = sender.send_email(&make_email()).await;

        assert_eq!(result, Err(NotificationError::CredentialMissing));
    }

    #[tokio::test]
    async fn 空白のみのapiキーは未設定として扱う() {
        let sender = SendGridNotificationSender::new(
            "http://127.0.0.1:9/v3/mail/send",
            Some("   ".to_string()),
            "noreply@anyenv-inc.com".to_string(),
        );

        let result = sender.send_email(&make_email()).await;

        assert_eq!(result, Err(NotificationError::CredentialMissing));
    }

    #[test]
    fn debug出力にapiキーを含まない() {
        let sender = SendGridNotificationSender::new(
            DEFAULT_SENDGRID_API_URL,
            Some("SG.secret".to_string()),
            "noreply@anyenv-inc.com".to_string(),
        );

        let debug = format!("{sender:?}");

        assert!(!debug.contains("SG.secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
