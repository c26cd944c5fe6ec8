//! # セミナー申込インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: 申込レコードの永続化
//! - **メール送信**: トランザクションメール配信プロバイダ（SendGrid）への送信
//!
//! ## 依存関係
//!
//! ```text
//! seminar-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`notification`] - メール送信
//! - [`repository`] - リポジトリ実装
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;

pub use error::InfraError;
