//! # 稼働確認ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /` - 稼働確認テキスト
//! - `GET /health` - Liveness（アプリケーション自体の起動状態のみ）
//! - `GET /health/ready` - Readiness（依存サービスへの疎通を含む）
//!
//! ## レスポンス例
//!
//! ```json
//! { "status": "ready", "checks": { "database": "ok" } }
//! ```

use std::{collections::HashMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use taskmgmt_infra::db::ReadinessCheck;
use taskmgmt_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

/// Readiness Check の共有状態
pub struct ReadinessState {
    pub checks: Vec<Arc<dyn ReadinessCheck>>,
}

/// 稼働確認テキストを返す
pub async fn root() -> &'static str {
    "beshi beshi task running"
}

/// ヘルスチェックエンドポイント
///
/// データベースへの接続は確認せず、常に 200 OK を返す。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check エンドポイント
///
/// 1 つでも疎通に失敗した依存先があれば 503 を返す。
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut checks = HashMap::with_capacity(state.checks.len());
    for check in &state.checks {
        let status = match check.check().await {
            Ok(()) => CheckStatus::Ok,
            Err(e) => {
                tracing::warn!(check = check.name(), error = %e, "疎通確認に失敗しました");
                CheckStatus::Error
            }
        };
        checks.insert(check.name().to_string(), status);
    }

    let response = ReadinessResponse::from_checks(checks);
    let status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response))
}
