//! # セミナー申込サービス サーバー
//!
//! セミナー申込フォームの送信を受け付ける HTTP サーバー。
//!
//! ## 役割
//!
//! - **入力検証**: 全項目を検証し、フィールド単位のエラーを返す
//! - **申込の保存**: PostgreSQL に申込レコードを 1 件追加する
//! - **通知メール**: 管理者と申込者へメールを送信する（失敗しても申込は成立）
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SEMINAR_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `SEMINAR_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `NOTIFICATION_BACKEND` | No | `sendgrid`（デフォルト） / `noop` |
//! | `SENDGRID_API_KEY` | No | 未設定の場合、メール送信はすべて失敗扱い |
//! | `SENDGRID_API_URL` | No | SendGrid Mail Send API の URL |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元アドレス |
//! | `NOTIFICATION_ADMIN_ADDRESS` | No | 管理者通知の宛先 |
//! | `NOTIFICATION_TIMEOUT_SECS` | No | 1 通あたりの送信タイムアウト（秒） |
//! | `LOG_FORMAT` | No | `pretty`（デフォルト） / `json` |
//!
//! ## 起動方法
//!
//! ```bash
//! SEMINAR_PORT=13010 DATABASE_URL=postgres://... cargo run -p seminar-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use seminar_domain::clock::SystemClock;
use seminar_infra::{
    db,
    notification::{NoopNotificationSender, NotificationSender, SendGridNotificationSender},
    repository::{PostgresRegistrationRepository, RegistrationRepository},
};
use seminar_service::{
    app_builder::build_app,
    config::{NotificationBackend, SeminarConfig},
    handler::{ReadinessState, RegistrationState},
    usecase::{NotificationService, RegistrationUseCaseImpl, TemplateRenderer},
};
use seminar_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// セミナー申込サービスのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let _tracing_guard = init_tracing(&TracingConfig::from_env("seminar-service")).entered();

    let config = SeminarConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "セミナー申込サービスを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    let notification = config.notification;
    let sender: Arc<dyn NotificationSender> = match notification.backend {
        NotificationBackend::SendGrid => {
            if notification.sendgrid_api_key.is_none() {
                tracing::warn!("SENDGRID_API_KEY が未設定のため、通知メールは送信されません");
            }
            Arc::new(SendGridNotificationSender::new(
                notification.sendgrid_api_url,
                notification.sendgrid_api_key,
                notification.from_address,
            ))
        }
        NotificationBackend::Noop => Arc::new(NoopNotificationSender),
    };
    tracing::info!(backend = %notification.backend, "通知バックエンドを初期化しました");

    let template_renderer =
        TemplateRenderer::new(config.seminar).context("メールテンプレートの読み込みに失敗しました")?;
    let notification_service = NotificationService::new(
        sender,
        template_renderer,
        notification.admin_address,
        notification.send_timeout,
    );

    let repository: Arc<dyn RegistrationRepository> =
        Arc::new(PostgresRegistrationRepository::new(pool));
    let usecase = RegistrationUseCaseImpl::new(
        repository,
        Arc::new(notification_service),
        Arc::new(SystemClock),
    );
    let registration_state = Arc::new(RegistrationState {
        usecase: Arc::new(usecase),
    });

    let app = build_app(registration_state, readiness_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("セミナー申込サービスが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
