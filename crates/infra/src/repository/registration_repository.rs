//! # RegistrationRepository
//!
//! セミナー申込の永続化を担当するリポジトリ。
//!
//! 申込は 1 件 = 1 行の不変レコードで、INSERT のみを提供する。

use async_trait::async_trait;
use seminar_domain::registration::{Challenge, SeminarRegistration};
use sqlx::PgPool;

use crate::error::InfraError;

/// 申込リポジトリトレイト
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// 申込を挿入する
    async fn insert(&self, registration: &SeminarRegistration) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の RegistrationRepository
#[derive(Debug, Clone)]
pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(registration_id = %registration.id()))]
    async fn insert(&self, registration: &SeminarRegistration) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO seminar_registrations (
                id, company_name, name, position,
                email, phone, challenge, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(registration.id().as_uuid())
        .bind(registration.company().as_str())
        .bind(registration.name().as_str())
        .bind(registration.position().as_str())
        .bind(registration.email().as_str())
        .bind(registration.phone().as_str())
        .bind(registration.challenge().map(Challenge::as_str))
        .bind(registration.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresRegistrationRepository>();
    }
}
