//! # 通知
//!
//! 申込受付に伴うメール通知のドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`RegistrationNotification`] | 申込通知イベント（管理者向け / 申込者向け） |
//! | [`NotificationEventType`] | 通知イベント種別 |
//! | [`EmailMessage`] | レンダリング済みメール |
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: 通知送信の失敗は申込の受付結果に影響しない
//! - **テンプレート分離**: 通知イベントとメール生成は分離（TemplateRenderer は seminar-service）

use std::time::Duration;

use strum::IntoStaticStr;
use thiserror::Error;

use crate::registration::SeminarRegistration;

/// 通知送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// メール配信プロバイダの認証情報が未設定
    #[error("メール配信プロバイダの API キーが設定されていません")]
    CredentialMissing,

    /// プロバイダが送信を受け付けなかった（202 以外）
    #[error("メール配信プロバイダが送信を拒否しました: status={status}, body={body}")]
    Rejected { status: u16, body: String },

    /// 通信エラーなどによる送信失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// 送信が制限時間内に完了しなかった
    #[error("メール送信がタイムアウトしました: {0:?}")]
    Timeout(Duration),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知イベント種別
///
/// ログの `notification.event_type` フィールドに出力される値。
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationEventType {
    /// 新規申込通知: 管理者の受信箱に送信
    AdminNotice,
    /// 申込完了通知: 申込者本人に送信
    ApplicantConfirmation,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// 申込通知イベント
#[derive(Debug, Clone, Copy)]
pub enum RegistrationNotification<'a> {
    /// 新規申込通知: 管理者の受信箱に送信
    AdminNotice {
        registration: &'a SeminarRegistration,
        admin_email:  &'a str,
    },
    /// 申込完了通知: 申込者本人に送信
    ApplicantConfirmation {
        registration: &'a SeminarRegistration,
    },
}

impl<'a> RegistrationNotification<'a> {
    /// 通知イベント種別を返す
    pub fn event_type(&self) -> NotificationEventType {
        match self {
            Self::AdminNotice { .. } => NotificationEventType::AdminNotice,
            Self::ApplicantConfirmation { .. } => NotificationEventType::ApplicantConfirmation,
        }
    }

    /// 通知対象の申込を返す
    pub fn registration(&self) -> &'a SeminarRegistration {
        match *self {
            Self::AdminNotice { registration, .. }
            | Self::ApplicantConfirmation { registration } => registration,
        }
    }

    /// 送信先メールアドレスを返す
    pub fn recipient_email(&self) -> &'a str {
        match *self {
            Self::AdminNotice { admin_email, .. } => admin_email,
            Self::ApplicantConfirmation { registration } => registration.email().as_str(),
        }
    }
}
