//! # アプリケーション構築
//!
//! DI（ユースケース・State）の初期化とルーター構築を担当する。
//! `main` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, patch, post},
};
use taskmgmt_infra::{
    TokenIssuer,
    db::ReadinessCheck,
    repository::{TaskRepository, UserRepository},
};
use taskmgmt_shared::observability::{MakeRequestUuidV7, make_request_span};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::AppConfig,
    handler::{
        ReadinessState,
        TaskState,
        TokenState,
        UserState,
        create_task,
        create_user,
        delete_task,
        health_check,
        issue_token,
        list_tasks,
        list_users,
        readiness_check,
        root,
        update_task,
    },
    usecase::{TaskUseCaseImpl, UserUseCaseImpl},
};

/// ルーターが必要とする依存
///
/// 本番では PostgreSQL 実装、テストではモックを渡す。
pub struct AppDependencies {
    pub user_repository:  Arc<dyn UserRepository>,
    pub task_repository:  Arc<dyn TaskRepository>,
    pub token_issuer:     Arc<dyn TokenIssuer>,
    pub readiness_checks: Vec<Arc<dyn ReadinessCheck>>,
}

/// DI コンテナの構築とルーター定義を行う
pub fn build_app(config: &AppConfig, deps: AppDependencies) -> Router {
    let readiness_state = Arc::new(ReadinessState {
        checks: deps.readiness_checks,
    });
    let user_state = Arc::new(UserState {
        usecase: UserUseCaseImpl::new(deps.user_repository),
    });
    let token_state = Arc::new(TokenState {
        issuer: deps.token_issuer,
    });
    let task_state = Arc::new(TaskState {
        usecase: TaskUseCaseImpl::new(deps.task_repository, config.task_update_mode),
    });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state)
        .route("/users", post(create_user).get(list_users))
        .with_state(user_state)
        .route("/jwt", post(issue_token))
        .with_state(token_state)
        .route("/tasks", post(create_task).get(list_tasks))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .with_state(task_state)
        .layer(cors_layer(&config.cors_allowed_origins))
        // 下に書いたものが外側
        // 1. SetRequestIdLayer: UUID v7 を生成（クライアント提供値があればそれを使用）
        // 2. TraceLayer: request_id を含むスパンを作成
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// 設定のホストとポートで待ち受けを開始する
///
/// `HOST` には IP アドレスのほか `localhost` などのホスト名も指定できる。
pub async fn bind_listener(config: &AppConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind((config.host.as_str(), config.port)).await
}

/// 許可リストのオリジンにのみ、資格情報付きのクロスオリジンアクセスを許可する
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "CORS オリジンとして解釈できないため無視します");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
