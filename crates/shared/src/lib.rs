//! # セミナー申込サービス 共有ユーティリティ
//!
//! このクレートは、ワークスペース全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - domain / infra / seminar-service のいずれからも依存できる
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - トレーシング関連の依存は `observability` feature に閉じ込める

pub mod api_response;
pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
