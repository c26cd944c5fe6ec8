//! # セミナー申込サービス ライブラリ
//!
//! ルーター・ハンドラ・ユースケースを公開する。
//! 統合テストから内部モジュールへのアクセスを提供する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
