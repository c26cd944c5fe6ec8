//! # セミナー申込サービス設定
//!
//! 環境変数からサーバーの設定を読み込む。
//!
//! テストから任意の値を注入できるよう、読み込みは [`SeminarConfig::from_lookup`]
//! にキー → 値の関数を渡す形で行う。

use std::{num::NonZeroU64, str::FromStr, time::Duration};

use seminar_infra::notification::DEFAULT_SENDGRID_API_URL;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値の形式が不正
    #[error("{key} の値が不正です: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// セミナー申込サービスの設定
#[derive(Debug, Clone)]
pub struct SeminarConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
    /// 通知設定
    pub notification: NotificationConfig,
    /// メール本文に埋め込むセミナー情報
    pub seminar: SeminarProfile,
}

/// 通知送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationBackend {
    /// SendGrid Mail Send API 経由で送信
    #[default]
    SendGrid,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// 通知機能の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `sendgrid`: SendGrid 経由で送信（デフォルト）
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:          NotificationBackend,
    /// SendGrid API キー（未設定の場合、送信はすべて失敗扱い）
    pub sendgrid_api_key: Option<String>,
    /// SendGrid Mail Send API の URL
    pub sendgrid_api_url: String,
    /// 送信元メールアドレス
    pub from_address:     String,
    /// 管理者通知の宛先
    pub admin_address:    String,
    /// 1 通あたりの送信タイムアウト
    pub send_timeout:     Duration,
}

impl std::fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("backend", &self.backend)
            .field(
                "sendgrid_api_key",
                &self.sendgrid_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sendgrid_api_url", &self.sendgrid_api_url)
            .field("from_address", &self.from_address)
            .field("admin_address", &self.admin_address)
            .field("send_timeout", &self.send_timeout)
            .finish()
    }
}

/// メール本文に埋め込むセミナー情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeminarProfile {
    pub title:           String,
    pub schedule:        String,
    pub format:          String,
    pub fee:             String,
    pub organizer:       String,
    pub contact_address: String,
}

impl Default for SeminarProfile {
    fn default() -> Self {
        Self {
            title:           "SI・開発営業向けGemini活用セミナー".to_string(),
            schedule:        "2026年2月3日(火) 14:00～15:00".to_string(),
            format:          "オンライン（Google Meet）".to_string(),
            fee:             "無料".to_string(),
            organizer:       "anyenv株式会社".to_string(),
            contact_address: "info@anyenv-inc.com".to_string(),
        }
    }
}

const DEFAULT_FROM_ADDRESS: &str = "noreply@anyenv-inc.com";
const DEFAULT_ADMIN_ADDRESS: &str = "info@anyenv-inc.com";
const DEFAULT_SEND_TIMEOUT_SECS: u64 = 5;

impl SeminarConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// キー → 値の関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let port_raw = get("SEMINAR_PORT").ok_or(ConfigError::Missing("SEMINAR_PORT"))?;
        let port = parse_value("SEMINAR_PORT", &port_raw)?;
        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let backend = match get("NOTIFICATION_BACKEND") {
            Some(raw) => parse_value("NOTIFICATION_BACKEND", &raw)?,
            None => NotificationBackend::default(),
        };
        let timeout_secs = match get("NOTIFICATION_TIMEOUT_SECS") {
            // 1 秒以上
            Some(raw) => parse_value::<NonZeroU64>("NOTIFICATION_TIMEOUT_SECS", &raw)?.get(),
            None => DEFAULT_SEND_TIMEOUT_SECS,
        };

        let defaults = SeminarProfile::default();

        Ok(Self {
            host: get_or("SEMINAR_HOST", "0.0.0.0"),
            port,
            database_url,
            notification: NotificationConfig {
                backend,
                sendgrid_api_key: get("SENDGRID_API_KEY"),
                sendgrid_api_url: get_or("SENDGRID_API_URL", DEFAULT_SENDGRID_API_URL),
                from_address: get_or("NOTIFICATION_FROM_ADDRESS", DEFAULT_FROM_ADDRESS),
                admin_address: get_or("NOTIFICATION_ADMIN_ADDRESS", DEFAULT_ADMIN_ADDRESS),
                send_timeout: Duration::from_secs(timeout_secs),
            },
            seminar: SeminarProfile {
                title:           get_or("SEMINAR_TITLE", &defaults.title),
                schedule:        get_or("SEMINAR_SCHEDULE", &defaults.schedule),
                format:          get_or("SEMINAR_FORMAT", &defaults.format),
                fee:             get_or("SEMINAR_FEE", &defaults.fee),
                organizer:       get_or("SEMINAR_ORGANIZER", &defaults.organizer),
                contact_address: get_or("SEMINAR_CONTACT_ADDRESS", &defaults.contact_address),
            },
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
