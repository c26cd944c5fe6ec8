//! # 業務イベントログ
//!
//! 申込の受付と通知メールの成否を、後から集計できる形でログに残す。
//!
//! 1 件の申込につき次の 3 行が出る（通知は成否いずれか）:
//!
//! ```text
//! event.action=registration.created   event.entity_id=<申込 ID>
//! event.action=notification.sent|failed notification.event_type=admin_notice
//! event.action=notification.sent|failed notification.event_type=applicant_confirmation
//! ```
//!
//! 障害ログは `tracing::error!` に [`error::category`] と [`error::kind`] の
//! 定数を付けて出力する。

/// 業務イベントを `info` レベルで出力する
///
/// `event.kind = "business_event"` が付与される。フィールドは
/// `event.category` / `event.action` / `event.result` を必ず指定し、
/// 対象がある場合は `event.entity_type` / `event.entity_id` を添える。
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const REGISTRATION: &str = "registration";
        pub const NOTIFICATION: &str = "notification";
    }

    /// イベントアクション
    pub mod action {
        // 申込
        pub const REGISTRATION_CREATED: &str = "registration.created";

        // 通知
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const SEMINAR_REGISTRATION: &str = "seminar_registration";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（DB）
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// 外部サービス呼び出し（メール配信プロバイダ）
        pub const EXTERNAL_SERVICE: &str = "external_service";
    }

    /// エラー種別
    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const EMAIL_DELIVERY: &str = "email_delivery";
    }
}
