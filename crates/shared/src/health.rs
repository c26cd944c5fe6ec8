//! # ヘルスチェック共通型
//!
//! `/health` と `/health/ready` のレスポンス型を提供する。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// `status` はサービスの稼働状態、`version` は Cargo.toml のバージョンを示す。
///
/// ## 使用例
///
/// ```
/// use seminar_shared::HealthResponse;
///
/// let response = HealthResponse {
///     status:  "healthy".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` または `"unhealthy"`）
    pub status:  String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version: String,
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// チェック成功
    Ok,
    /// チェック失敗
    Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// 全依存サービスが利用可能
    Ready,
    /// 一部の依存サービスが利用不可
    NotReady,
}

/// Readiness Check レスポンス
///
/// `status` は全体のステータス、`checks` は個別チェック結果を示す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// 全体のステータス
    pub status: ReadinessStatus,
    /// 個別チェック結果（キー: チェック名、値: ステータス）
    pub checks: HashMap<String, CheckStatus>,
}

impl ReadinessResponse {
    /// 個別チェック結果から全体のステータスを決定する
    ///
    /// すべてのチェックが [`CheckStatus::Ok`] の場合のみ Ready になる。
    pub fn from_checks(checks: HashMap<String, CheckStatus>) -> Self {
        let status = if checks.values().all(|s| *s == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }
}
