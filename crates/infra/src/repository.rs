//! # リポジトリ
//!
//! 申込レコードの永続化を担当する。

pub mod registration_repository;

pub use registration_repository::{PostgresRegistrationRepository, RegistrationRepository};
