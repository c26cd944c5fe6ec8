//! # アプリケーション構築
//!
//! ルーター構築とミドルウェアの適用を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use seminar_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    ReadinessState,
    RegistrationState,
    health_check,
    readiness_check,
    submit_registration,
};

/// ルーターを構築する
///
/// レイヤーは下から順に外側になる。Request ID の採番 → リクエストスパン →
/// レスポンスへの Request ID 伝播の順に適用される。
pub fn build_app(
    registration_state: Arc<RegistrationState>,
    readiness_state: Arc<ReadinessState>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/api/seminar/registrations", post(submit_registration))
        .with_state(registration_state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
