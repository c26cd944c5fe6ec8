//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式 `{ "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 公開 API の統一レスポンス型
///
/// 成功レスポンスはすべて `{ "data": T }` 形式で返す。
///
/// ## 使用例
///
/// ```
/// use seminar_shared::ApiResponse;
///
/// let response = ApiResponse::new("hello");
/// assert_eq!(response.data, "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
