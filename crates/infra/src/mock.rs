//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! seminar-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use seminar_domain::{
    notification::{EmailMessage, NotificationError},
    registration::SeminarRegistration,
};

use crate::{
    error::InfraError,
    notification::NotificationSender,
    repository::RegistrationRepository,
};

// ===== MockRegistrationRepository =====

#[derive(Clone, Default)]
pub struct MockRegistrationRepository {
    registrations: Arc<Mutex<Vec<SeminarRegistration>>>,
    fail:          bool,
}

impl MockRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に保存に失敗するリポジトリ
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// 保存された申込を返す
    pub fn registrations(&self) -> Vec<SeminarRegistration> {
        self.registrations.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistrationRepository for MockRegistrationRepository {
    async fn insert(&self, registration: &SeminarRegistration) -> Result<(), InfraError> {
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        self.registrations.lock().unwrap().push(registration.clone());
        Ok(())
    }
}

// ===== MockNotificationSender =====

/// 送信試行をすべて記録するモック
///
/// `attempts()` は失敗した送信も含み、`sent_emails()` は成功した送信のみを含む。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    attempts: Arc<Mutex<Vec<EmailMessage>>>,
    sent:     Arc<Mutex<Vec<EmailMessage>>>,
    fail_all: bool,
    fail_for: Option<String>,
    delay:    Option<Duration>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての送信に失敗するモック
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// 指定した宛先への送信のみ失敗するモック
    pub fn fail_for(recipient: impl Into<String>) -> Self {
        Self {
            fail_for: Some(recipient.into()),
            ..Self::default()
        }
    }

    /// 送信完了まで指定時間待機する
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 送信試行されたメール（失敗を含む）
    pub fn attempts(&self) -> Vec<EmailMessage> {
        self.attempts.lock().unwrap().clone()
    }

    /// 送信に成功したメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.attempts.lock().unwrap().push(email.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_all || self.fail_for.as_deref() == Some(email.to.as_str()) {
            return Err(NotificationError::SendFailed("モック送信失敗".to_string()));
        }

        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
