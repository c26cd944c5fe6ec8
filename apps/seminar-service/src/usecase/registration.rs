//! # 申込ユースケース
//!
//! セミナー申込の受付フローを実装する。
//!
//! ## 処理フロー
//!
//! 1. 全フィールドを検証（失敗したフィールドをすべて返す）
//! 2. 申込を保存（失敗した場合は通知を行わずにエラー）
//! 3. 管理者通知と申込者通知を並行して送信（失敗してもログのみ）
//! 4. 完了メッセージを返す
//!
//! 保存に成功した時点で申込は成立する。通知の成否は結果に影響しない。

use std::sync::Arc;

use async_trait::async_trait;
use seminar_domain::{
    clock::Clock,
    registration::{RegistrationId, RegistrationInput, SeminarRegistration},
};
use seminar_infra::repository::RegistrationRepository;
use seminar_shared::{event_log::event, log_business_event};
use serde::Serialize;

use super::NotificationService;
use crate::error::SeminarError;

/// 申込完了時に利用者へ返す文言
pub const REGISTRATION_COMPLETED_MESSAGE: &str =
    "申し込みが完了しました。確認メールをご確認ください。";

/// 申込受付の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationOutput {
    pub success: bool,
    pub message: String,
}

/// 申込ユースケーストレイト
///
/// 具体的な実装は [`RegistrationUseCaseImpl`] で提供される。
#[async_trait]
pub trait RegistrationUseCase: Send + Sync {
    /// 申込を受け付ける
    ///
    /// # エラー
    ///
    /// - [`SeminarError::Validation`]: 入力内容に誤りがある
    /// - [`SeminarError::Database`]: 申込の保存に失敗した
    async fn submit(&self, input: RegistrationInput) -> Result<RegistrationOutput, SeminarError>;
}

/// 申込ユースケース実装
pub struct RegistrationUseCaseImpl {
    repository:           Arc<dyn RegistrationRepository>,
    notification_service: Arc<NotificationService>,
    clock:                Arc<dyn Clock>,
}

impl RegistrationUseCaseImpl {
    pub fn new(
        repository: Arc<dyn RegistrationRepository>,
        notification_service: Arc<NotificationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            notification_service,
            clock,
        }
    }
}

#[async_trait]
impl RegistrationUseCase for RegistrationUseCaseImpl {
    async fn submit(&self, input: RegistrationInput) -> Result<RegistrationOutput, SeminarError> {
        let validated = input.validate()?;
        let registration =
            SeminarRegistration::new(RegistrationId::new(), validated, self.clock.now());

        self.repository.insert(&registration).await?;

        log_business_event!(
            event.category = event::category::REGISTRATION,
            event.action = event::action::REGISTRATION_CREATED,
            event.entity_type = event::entity_type::SEMINAR_REGISTRATION,
            event.entity_id = %registration.id(),
            event.result = event::result::SUCCESS,
            "セミナー申込を受け付けました"
        );

        let (admin_sent, applicant_sent) = tokio::join!(
            self.notification_service.notify_admin(&registration),
            self.notification_service.notify_applicant(&registration),
        );

        tracing::info!(
            registration_id = %registration.id(),
            admin_sent,
            applicant_sent,
            "申込通知の送信が完了しました"
        );

        Ok(RegistrationOutput {
            success: true,
            message: REGISTRATION_COMPLETED_MESSAGE.to_string(),
        })
    }
}
