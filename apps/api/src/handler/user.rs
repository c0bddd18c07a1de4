//! # ユーザーハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /users` - ユーザー登録（email 重複時は 409）
//! - `GET /users` - 全ユーザー一覧

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use super::{
    document_from_body,
    response::{InsertResultDto, MessageResponse},
};
use crate::{error::ApiError, usecase::UserUseCaseImpl};

/// ユーザー API の共有状態
pub struct UserState {
    pub usecase: UserUseCaseImpl,
}

/// ユーザーを登録する
///
/// ## エンドポイント
/// POST /users
pub async fn create_user(
    State(state): State<Arc<UserState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = document_from_body(body)?;

    let summary = state.usecase.register(fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_result(
            "User added successfully",
            InsertResultDto::from(summary),
        )),
    ))
}

/// 全ユーザーを取得する
///
/// ## エンドポイント
/// GET /users
pub async fn list_users(
    State(state): State<Arc<UserState>>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let users = state.usecase.list().await?;

    Ok(Json(users.iter().map(|u| u.to_json()).collect()))
}
