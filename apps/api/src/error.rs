//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError / InfraError
//!        ↓ 変換（ユースケース層）
//! API エラー (ApiError)
//!        ↓ IntoResponse
//! HTTP レスポンス (StatusCode + JSON)
//! ```
//!
//! レスポンス本文は短いメッセージを持つ JSON オブジェクトのみで、
//! 内部エラーの詳細はサーバーログにだけ出力する。

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskmgmt_domain::DomainError;
use taskmgmt_infra::InfraError;
use taskmgmt_shared::ErrorResponse;
use thiserror::Error;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 不正なリクエスト（400 Bad Request）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// リソースが見つからない（404 Not Found）
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 一意キーの重複（409 Conflict）
    ///
    /// 本文は `{"message": ...}` 形式で返す。
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// 内部エラー（500 Internal Server Error）
    ///
    /// `message` はエンドポイントごとに固定の応答メッセージ。
    /// `source` はログにのみ出力する。
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source:  InfraError,
    },
}

impl ApiError {
    /// `InfraError` を固定メッセージ付きの内部エラーに変換する関数を返す
    ///
    /// ```rust,ignore
    /// repository.insert(&task).await.map_err(ApiError::internal("Failed to add task"))?;
    /// ```
    pub fn internal(message: &'static str) -> impl FnOnce(InfraError) -> Self {
        move |source| Self::Internal { message, source }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::error(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::error(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::message(msg)),
            ApiError::Internal { message, source } => {
                tracing::error!(
                    error = %source,
                    span_trace = %source.span_trace(),
                    "{message}"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::error(message),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
