//! # 通知サービス
//!
//! テンプレートレンダリング → メール送信 → ログ記録を統合するサービス。
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: 送信に失敗してもエラーを返さず、成否を `bool` で返す
//! - **タイムアウト**: 1 通ごとに送信時間の上限を設け、超過時は失敗扱い
//! - **依存性注入**: `NotificationSender` は trait で抽象化

use std::{sync::Arc, time::Duration};

use seminar_domain::{
    notification::{NotificationError, RegistrationNotification},
    registration::SeminarRegistration,
};
use seminar_infra::notification::NotificationSender;
use seminar_shared::{
    event_log::{
        error::{category, kind},
        event,
    },
    log_business_event,
};

use super::TemplateRenderer;

/// 通知サービス
///
/// 申込受付に伴う 2 通のメール（管理者向け / 申込者向け）を送信する。
pub struct NotificationService {
    sender:            Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    admin_address:     String,
    send_timeout:      Duration,
}

impl NotificationService {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        admin_address: String,
        send_timeout: Duration,
    ) -> Self {
        Self {
            sender,
            template_renderer,
            admin_address,
            send_timeout,
        }
    }

    /// 管理者へ新規申込通知を送信する
    pub async fn notify_admin(&self, registration: &SeminarRegistration) -> bool {
        self.notify(RegistrationNotification::AdminNotice {
            registration,
            admin_email: &self.admin_address,
        })
        .await
    }

    /// 申込者へ申込完了通知を送信する
    pub async fn notify_applicant(&self, registration: &SeminarRegistration) -> bool {
        self.notify(RegistrationNotification::ApplicantConfirmation { registration })
            .await
    }

    /// 通知を送信する（fire-and-forget）
    ///
    /// いずれのステップで失敗してもエラーを返さない（ログ出力のみ）。
    async fn notify(&self, notification: RegistrationNotification<'_>) -> bool {
        let event_type: &str = notification.event_type().into();
        let registration_id = notification.registration().id();

        let result = match self.template_renderer.render(&notification) {
            Ok(email) => tokio::time::timeout(self.send_timeout, self.sender.send_email(&email))
                .await
                .unwrap_or_else(|_| Err(NotificationError::Timeout(self.send_timeout))),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::SEMINAR_REGISTRATION,
                    event.entity_id = %registration_id,
                    event.result = event::result::SUCCESS,
                    notification.event_type = event_type,
                    "通知メール送信成功"
                );
                true
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::SEMINAR_REGISTRATION,
                    event.entity_id = %registration_id,
                    event.result = event::result::FAILURE,
                    notification.event_type = event_type,
                    error.category = category::EXTERNAL_SERVICE,
                    error.kind = kind::EMAIL_DELIVERY,
                    error = %e,
                    "通知メール送信失敗"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use seminar_domain::registration::{RegistrationId, RegistrationInput};
    use seminar_infra::mock::MockNotificationSender;

    use super::*;
    use crate::config::SeminarProfile;

    fn make_service(sender: MockNotificationSender, send_timeout: Duration) -> NotificationService {
        let template_renderer = TemplateRenderer::new(SeminarProfile::default()).unwrap();
        NotificationService::new(
            Arc::new(sender),
            template_renderer,
            "info@anyenv-inc.com".to_string(),
            send_timeout,
        )
    }

    fn make_registration() -> SeminarRegistration {
        let validated = RegistrationInput {
            company:   "Acme K.K.".to_string(),
            name:      "Taro Yamada".to_string(),
            position:  "Sales Manager".to_string(),
            email:     "taro@acme.example.com".to_string(),
            phone:     "03-1234-5678".to_string(),
            challenge: None,
        }
        .validate()
        .unwrap();
        SeminarRegistration::new(RegistrationId::new(), validated, Utc::now())
    }

    #[tokio::test]
    async fn 管理者通知は管理者アドレスに送信される() {
        let sender = MockNotificationSender::new();
        let service = make_service(sender.clone(), Duration::from_secs(5));

        let sent = service.notify_admin(&make_registration()).await;

        assert!(sent);
        let emails = sender.sent_emails();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, "info@anyenv-inc.com");
        assert_eq!(emails[0].subject, "【Geminiセミナー】新規登録通知");
    }

    #[tokio::test]
    async fn 申込者通知は申込者のアドレスに送信される() {
        let sender = MockNotificationSender::new();
        let service = make_service(sender.clone(), Duration::from_secs(5));

        let sent = service.notify_applicant(&make_registration()).await;

        assert!(sent);
        let emails = sender.sent_emails();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, "taro@acme.example.com");
        assert_eq!(
            emails[0].subject,
            "【登録完了】Gemini活用セミナー 営業改革シリーズ"
        );
    }

    #[tokio::test]
    async fn 送信失敗時はfalseを返しエラーを伝播しない() {
        let sender = MockNotificationSender::failing();
        let service = make_service(sender.clone(), Duration::from_secs(5));

        let sent = service.notify_admin(&make_registration()).await;

        assert!(!sent);
        assert_eq!(sender.attempts().len(), 1);
        assert!(sender.sent_emails().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn タイムアウトした場合はfalseを返す() {
        let sender = MockNotificationSender::new().with_delay(Duration::from_secs(30));
        let service = make_service(sender.clone(), Duration::from_secs(5));

        let sent = service.notify_applicant(&make_registration()).await;

        assert!(!sent);
        assert_eq!(sender.attempts().len(), 1);
        assert!(sender.sent_emails().is_empty());
    }
}
