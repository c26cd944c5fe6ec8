//! ログ出力のみの送信実装
//!
//! `NOTIFICATION_BACKEND=noop` で選択する。SendGrid のキーを持たないローカル環境でも
//! 申込フローを最後まで通し、生成されたメール本文をログで確認できる。

use async_trait::async_trait;
use seminar_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            subject = %email.subject,
            html_bytes = email.html_body.len(),
            "通知バックエンドが noop のため送信しません"
        );
        tracing::debug!(text_body = %email.text_body, "送信されなかったメール本文");
        Ok(())
    }
}
