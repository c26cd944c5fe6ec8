//! # セミナー申込ドメイン層
//!
//! セミナー申込の受付に関わるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 入力値は生成時に検証し、不正な値を型レベルで排除する
//! - **フィールド単位のエラー**: 検証失敗はフィールド名 → メッセージの集合で返し、
//!   フォームの各項目にエラーを表示できるようにする
//! - **インフラ非依存**: DB やメール配信プロバイダには一切依存しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! seminar-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`registration`] - 申込入力の検証と申込エンティティ
//! - [`notification`] - 通知メールのドメイン型
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層エラー
//!
//! ## 使用例
//!
//! ```rust
//! use seminar_domain::registration::{RegistrationField, RegistrationInput};
//!
//! let input = RegistrationInput {
//!     company:   "Acme K.K.".to_string(),
//!     name:      "Taro Yamada".to_string(),
//!     position:  "Sales Manager".to_string(),
//!     email:     "not-an-email".to_string(),
//!     phone:     "03-1234-5678".to_string(),
//!     challenge: None,
//! };
//!
//! let errors = input.validate().unwrap_err();
//! assert_eq!(errors.fields().collect::<Vec<_>>(), vec![RegistrationField::Email]);
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod notification;
pub mod registration;

pub use error::DomainError;
