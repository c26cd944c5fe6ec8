//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **テンプレート名 = 通知イベント種別**: `admin_notice.html` / `applicant_confirmation.txt` など
//! - **HTML は自動エスケープ**: 申込者の入力値はそのまま表示されるがマークアップとしては解釈されない
//! - **課題欄は任意**: 未入力の場合はセクションごと出力しない

use chrono::Datelike;
use seminar_domain::notification::{
    EmailMessage,
    NotificationError,
    NotificationEventType,
    RegistrationNotification,
};
use tera::{Context, Tera};

use crate::config::SeminarProfile;

/// 管理者向け新規申込通知の件名
pub const ADMIN_NOTICE_SUBJECT: &str = "【Geminiセミナー】新規登録通知";

/// 申込者向け申込完了通知の件名
pub const APPLICANT_CONFIRMATION_SUBJECT: &str = "【登録完了】Gemini活用セミナー 営業改革シリーズ";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`RegistrationNotification` から
/// `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine:  Tera,
    seminar: SeminarProfile,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new(seminar: SeminarProfile) -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "admin_notice.html",
                    include_str!("../../../templates/notifications/admin_notice.html"),
                ),
                (
                    "admin_notice.txt",
                    include_str!("../../../templates/notifications/admin_notice.txt"),
                ),
                (
                    "applicant_confirmation.html",
                    include_str!("../../../templates/notifications/applicant_confirmation.html"),
                ),
                (
                    "applicant_confirmation.txt",
                    include_str!("../../../templates/notifications/applicant_confirmation.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine, seminar })
    }

    /// 通知イベントからメールメッセージを生成する
    pub fn render(
        &self,
        notification: &RegistrationNotification<'_>,
    ) -> Result<EmailMessage, NotificationError> {
        let event_type = notification.event_type();
        let template_name: &str = event_type.into();
        let context = self.build_context(notification);

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: notification.recipient_email().to_string(),
            subject: subject_for(event_type).to_string(),
            html_body,
            text_body,
        })
    }

    fn build_context(&self, notification: &RegistrationNotification<'_>) -> Context {
        let registration = notification.registration();

        let mut context = Context::new();
        context.insert("company", registration.company().as_str());
        context.insert("name", registration.name().as_str());
        context.insert("position", registration.position().as_str());
        context.insert("email", registration.email().as_str());
        context.insert("phone", registration.phone().as_str());
        context.insert(
            "challenge",
            &registration.challenge().map(|c| c.as_str()),
        );

        context.insert("seminar_title", &self.seminar.title);
        context.insert("schedule", &self.seminar.schedule);
        context.insert("format", &self.seminar.format);
        context.insert("fee", &self.seminar.fee);
        context.insert("organizer", &self.seminar.organizer);
        context.insert("contact_address", &self.seminar.contact_address);
        context.insert("copyright_year", &registration.created_at().year());

        context
    }
}

/// 通知イベント種別ごとの固定件名
fn subject_for(event_type: NotificationEventType) -> &'static str {
    match event_type {
        NotificationEventType::AdminNotice => ADMIN_NOTICE_SUBJECT,
        NotificationEventType::ApplicantConfirmation => APPLICANT_CONFIRMATION_SUBJECT,
    }
}
