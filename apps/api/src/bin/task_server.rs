//! # タスク管理 API サーバー
//!
//! ## 環境変数
//!
//! [`taskmgmt_api::config`] を参照。ログ出力は以下で制御する:
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `RUST_LOG` | `info,taskmgmt=debug` | ログフィルタ |
//! | `LOG_FORMAT` | `pretty` | `json` / `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run --bin task-server
//!
//! # 本番環境
//! DATABASE_URL=postgres://... JWT_SECRET=... cargo run --bin task-server --release
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use taskmgmt_api::{
    app_builder::{AppDependencies, bind_listener, build_app},
    config::AppConfig,
};
use taskmgmt_infra::{
    JwtTokenIssuer,
    db::{self, PgReadinessCheck},
    repository::{PostgresTaskRepository, PostgresUserRepository},
};
use taskmgmt_shared::observability::{TracingConfig, init_tracing};
use tokio::signal;

/// サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. 設定の読み込み
/// 4. 接続プールの作成とマイグレーション
/// 5. ルーターの構築と HTTP サーバーの起動
/// 6. シグナル受信後、処理中のリクエストを待って接続プールを閉じる
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("task-server"));
    let _tracing_guard = tracing::info_span!("app", service = "task-server").entered();

    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::info!(
        "サーバーを起動します: {}:{} (update_mode={})",
        config.host,
        config.port,
        config.task_update_mode
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベースへの接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの適用に失敗しました")?;
    tracing::info!("データベースに接続しました");

    let token_issuer = JwtTokenIssuer::new(config.jwt_secret.clone());
    if !token_issuer.is_configured() {
        tracing::warn!("JWT_SECRET が未設定です。POST /jwt は失敗します");
    }

    let app = build_app(
        &config,
        AppDependencies {
            user_repository:  Arc::new(PostgresUserRepository::new(pool.clone())),
            task_repository:  Arc::new(PostgresTaskRepository::new(pool.clone())),
            token_issuer:     Arc::new(token_issuer),
            readiness_checks: vec![Arc::new(PgReadinessCheck::new(pool.clone()))],
        },
    );

    let listener = bind_listener(&config)
        .await
        .with_context(|| format!("{}:{} にバインドできませんでした", config.host, config.port))?;
    let addr = listener.local_addr()?;
    tracing::info!("サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("サーバーを停止しました");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラの登録に失敗しました: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl+C を受信しました。シャットダウンします"),
        () = terminate => tracing::info!("SIGTERM を受信しました。シャットダウンします"),
    }
}
