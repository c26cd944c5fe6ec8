//! # ユースケース層
//!
//! セミナー申込のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと送信手段を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - [`registration`]: 申込受付（検証 → 保存 → 通知）
//! - [`notification`]: 通知メールの生成と送信

pub mod notification;
pub mod registration;

pub use notification::{NotificationService, TemplateRenderer};
pub use registration::{RegistrationOutput, RegistrationUseCase, RegistrationUseCaseImpl};
