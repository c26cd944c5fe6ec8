//! # Observability 基盤
//!
//! - `LOG_FORMAT`（`json` / `pretty`）と `RUST_LOG` によるトレーシング初期化
//! - `x-request-id` の採番（UUID v7）とリクエストスパン

/// Request ID を運ぶ HTTP ヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `RUST_LOG` が未設定のときのフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,seminar=debug";

/// ログ出力形式（`LOG_FORMAT`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON。本番で集約基盤に流す
    Json,
    /// 開発用
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 前後の空白と大文字小文字は区別しない。未知の値は `None`。
    pub fn from_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// ルートスパン `app` の `service` フィールド
    pub service_name:       &'static str,
    pub log_format:         LogFormat,
    /// 解釈できなかった `LOG_FORMAT` の値
    ///
    /// subscriber の登録前は tracing で出力できないため、初期化後に警告する。
    pub unknown_log_format: Option<String>,
}

impl TracingConfig {
    /// キー → 値の関数から設定を読み込む
    ///
    /// `LOG_FORMAT` が未設定、空、または未知の値の場合は Pretty になる。
    pub fn from_lookup(
        service_name: &'static str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let raw = lookup("LOG_FORMAT").filter(|v| !v.trim().is_empty());
        let parsed = raw.as_deref().map(LogFormat::from_value);

        Self {
            service_name,
            log_format: parsed.flatten().unwrap_or_default(),
            unknown_log_format: match parsed {
                Some(None) => raw,
                _ => None,
            },
        }
    }

    pub fn from_env(service_name: &'static str) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }
}

/// トレーシングを初期化し、サービスのルートスパンを返す
///
/// - フィルタは `RUST_LOG`、未設定なら [`DEFAULT_LOG_FILTER`]
/// - `tracing_error::ErrorLayer` を登録し、`InfraError` の `SpanTrace` を解決可能にする
///
/// 返したスパンを `entered()` しておくと、以降のログに `service` が付く。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) -> tracing::Span {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    if let Some(value) = &config.unknown_log_format {
        tracing::warn!(log_format = %value, "未知の LOG_FORMAT のため pretty で出力します");
    }

    tracing::info_span!("app", service = config.service_name)
}

/// UUID v7 で Request ID を生成する `MakeRequestId` 実装
///
/// `SetRequestIdLayer::x_request_id(MakeRequestUuidV7)` として使用する。
/// クライアントが `X-Request-Id` を送ってきた場合はそちらが優先される。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = uuid::Uuid::now_v7().to_string();
        http::HeaderValue::from_str(&id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// リクエストスパンを作成する
///
/// `TraceLayer::new_for_http().make_span_with(make_request_span)` として使用する。
/// スパンに `request_id` を含めることで、リクエスト内の全ログに Request ID が付与される。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}


#[cfg(all(test, feature = "observability"))]
mod request_id_tests {
    use tower_http::request_id::MakeRequestId as _;

    use super::*;

    #[test]
    fn test_make_request_idがuuid_v7を生成する() {
        let request = http::Request::builder().body(()).unwrap();

        let id = MakeRequestUuidV7.make_request_id(&request).unwrap();
        let parsed = uuid::Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();

        assert_eq!(parsed.get_version_num(), 7);
    }
}
