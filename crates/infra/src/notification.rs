//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SendGrid（本番用）、Noop（ローカル開発・通知無効化用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択

mod noop;
mod sendgrid;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
use seminar_domain::notification::{EmailMessage, NotificationError};
pub use sendgrid::{DEFAULT_SENDGRID_API_URL, SendGridNotificationSender};

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
/// SendGrid / Noop の 2 実装を環境変数で切り替える。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
