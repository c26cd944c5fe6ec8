//! # PostgreSQL データベース接続管理
//!
//! データベース接続プールの作成、マイグレーション、疎通確認を行う。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use seminar_infra::db;
//!
//! async fn setup() -> Result<(), seminar_infra::InfraError> {
//!     let pool = db::create_pool("postgres://localhost/seminar").await?;
//!     db::run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::error::InfraError;

/// PostgreSQL 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したプールを共有する。
///
/// - `max_connections(10)`: 最大接続数
/// - `acquire_timeout(5秒)`: 接続取得のタイムアウト。超過時は申込の保存失敗になる
pub async fn create_pool(database_url: &str) -> Result<PgPool, InfraError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// データベースマイグレーションを実行する
///
/// `migrations/` 配下の SQL を順番に適用する。適用済みのものはスキップされる。
pub async fn run_migrations(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// データベースの疎通を確認する
///
/// Readiness Check から呼び出される。
#[tracing::instrument(skip_all, level = "debug")]
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
