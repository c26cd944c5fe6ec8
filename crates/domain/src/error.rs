//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成時に発生するビジネスルール違反を表現する。
//!
//! 申込フォーム全体の検証結果は [`FieldErrors`](crate::registration::FieldErrors)
//! にフィールド単位で集約される。`DomainError` は単一の値に対する違反を表す。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の超過
    /// - 不正なフォーマット
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}

impl DomainError {
    /// 利用者向けのメッセージ部分を取り出す
    ///
    /// `Display` は接頭辞付きのログ向け表現。フォームに表示するのはこちら。
    pub fn into_message(self) -> String {
        match self {
            Self::Validation(message) => message,
        }
    }
}
