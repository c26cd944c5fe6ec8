//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! サービス共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）
//! - よく使うエラー種別は便利コンストラクタで提供し、URI のハードコードを排除
//! - 入力エラーはフィールド名 → メッセージの `errors` 拡張メンバーで返す

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://seminar.anyenv-inc.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details）
///
/// `type` フィールドは URI で問題の種類を識別する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
    /// フィールド単位のエラー（RFC 9457 の拡張メンバー）
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors:     BTreeMap<String, String>,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// `error_type_suffix` はベース URI に付加される（例: `"validation-error"`）。
    pub fn new(
        error_type_suffix: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
            title: title.into(),
            status,
            detail: detail.into(),
            errors: BTreeMap::new(),
        }
    }

    /// フィールド単位のエラーを付与する
    pub fn with_errors<K, V>(mut self, errors: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.errors
            .extend(errors.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// 400 Bad Request
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new("bad-request", "Bad Request", 400, detail)
    }

    /// 400 Validation Error
    pub fn validation_error(detail: impl Into<String>) -> Self {
        Self::new("validation-error", "Validation Error", 400, detail)
    }

    /// 500 Internal Server Error
    ///
    /// detail は呼び出し側で固定文言を渡す（内部情報を漏らさないため）。
    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::new("internal-error", "Internal Server Error", 500, detail)
    }

    /// 503 Service Unavailable
    pub fn service_unavailable(detail: impl Into<String>) -> Self {
        Self::new("service-unavailable", "Service Unavailable", 503, detail)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_で全フィールドが正しく設定される() {
        let error = ErrorResponse::new("custom-error", "Custom Error", 418, "カスタムエラー");

        assert_eq!(
            error.error_type,
            "https://seminar.anyenv-inc.com/errors/custom-error"
        );
        assert_eq!(error.title, "Custom Error");
        assert_eq!(error.status, 418);
        assert_eq!(error.detail, "カスタムエラー");
        assert!(error.errors.is_empty());
    }

    #[test]
    fn test_全便利コンストラクタのstatusが正しい() {
        assert_eq!(ErrorResponse::bad_request("").status, 400);
        assert_eq!(ErrorResponse::validation_error("").status, 400);
        assert_eq!(ErrorResponse::internal_error("").status, 500);
        assert_eq!(ErrorResponse::service_unavailable("").status, 503);
    }

    #[test]
    fn test_errorsが空の場合はjsonに含まれない() {
        let error = ErrorResponse::internal_error("申し込み処理中にエラーが発生しました。");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "https://seminar.anyenv-inc.com/errors/internal-error",
                "title": "Internal Server Error",
                "status": 500,
                "detail": "申し込み処理中にエラーが発生しました。"
            })
        );
    }

    #[test]
    fn test_with_errorsでフィールドエラーがjsonに含まれる() {
        let error = ErrorResponse::validation_error("入力内容に誤りがあります")
            .with_errors([("email", "有効なメールアドレスを入力してください")]);
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["title"], "Validation Error");
        assert_eq!(
            json["errors"],
            serde_json::json!({ "email": "有効なメールアドレスを入力してください" })
        );
    }

    #[test]
    fn test_errorsなしのjsonもデシリアライズできる() {
        let json = r#"{
            "type": "https://seminar.anyenv-inc.com/errors/bad-request",
            "title": "Bad Request",
            "status": 400,
            "detail": "不正なリクエスト"
        }"#;
        let error: ErrorResponse = serde_json::from_str(json).unwrap();

        assert_eq!(error, ErrorResponse::bad_request("不正なリクエスト"));
    }
}
