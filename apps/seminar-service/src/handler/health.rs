//! # ヘルスチェックハンドラ
//!
//! サービスの稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! - `GET /health` - 生存確認（依存サービスは確認しない）
//! - `GET /health/ready` - データベースへの疎通を含む準備完了確認
//!
//! レスポンス型は [`seminar_shared::HealthResponse`] を参照。

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use seminar_infra::db;
use seminar_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
use sqlx::PgPool;

/// Readiness Check の共有状態
pub struct ReadinessState {
    pub pool: PgPool,
}

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check エンドポイント
///
/// データベースに接続できない場合は 503 を返す。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = check_database(&state.pool).await;
    let response = ReadinessResponse::from_checks(HashMap::from([(
        "database".to_string(),
        database,
    )]));

    let http_status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(response))
}

/// データベースへの接続を確認する（タイムアウト: 5 秒）
async fn check_database(pool: &PgPool) -> CheckStatus {
    match tokio::time::timeout(Duration::from_secs(5), db::ping(pool)).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: database ping timed out");
            CheckStatus::Error
        }
    }
}
