//! # セミナー申込サービス エラー定義
//!
//! サービス固有のエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use seminar_domain::registration::FieldErrors;
use seminar_shared::{
    ErrorResponse,
    event_log::error::{category, kind},
};
use thiserror::Error;

/// 申込処理に失敗した場合に利用者へ返す固定文言
pub const PROCESSING_ERROR_MESSAGE: &str = "申し込み処理中にエラーが発生しました。";

/// セミナー申込サービスで発生するエラー
#[derive(Debug, Error)]
pub enum SeminarError {
    /// 入力内容の検証エラー
    #[error("入力エラー: {0}")]
    Validation(FieldErrors),

    /// リクエストボディを解釈できない
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] seminar_infra::InfraError),
}

impl From<FieldErrors> for SeminarError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for SeminarError {
    fn into_response(self) -> Response {
        let body = match &self {
            SeminarError::Validation(errors) => {
                tracing::debug!(error = %errors, "申込の入力検証に失敗");
                ErrorResponse::validation_error(errors.to_string()).with_errors(
                    errors
                        .iter()
                        .map(|(field, message)| (field.to_string(), message)),
                )
            }
            SeminarError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "リクエストボディの解釈に失敗");
                ErrorResponse::bad_request(msg.clone())
            }
            SeminarError::Database(e) => {
                tracing::error!(
                    error.category = category::INFRASTRUCTURE,
                    error.kind = kind::DATABASE,
                    "データベースエラー: {}\n{}",
                    e,
                    e.span_trace()
                );
                ErrorResponse::internal_error(PROCESSING_ERROR_MESSAGE)
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
