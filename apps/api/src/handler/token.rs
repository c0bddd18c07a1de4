//! # トークンハンドラ
//!
//! `POST /jwt` - 本文をクレームとした 1 時間有効のアクセストークンを発行する。
//! 本文の内容は検証しない。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use serde_json::Value;
use taskmgmt_infra::TokenIssuer;

use super::document_from_body;
use crate::error::ApiError;

/// トークン API の共有状態
pub struct TokenState {
    pub issuer: Arc<dyn TokenIssuer>,
}

/// トークン発行レスポンス
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// アクセストークンを発行する
///
/// ## エンドポイント
/// POST /jwt
pub async fn issue_token(
    State(state): State<Arc<TokenState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let claims = document_from_body(body)?;

    let token = state
        .issuer
        .issue(&claims)
        .map_err(ApiError::internal("Failed to issue token"))?;

    Ok(Json(TokenResponse { token }))
}
