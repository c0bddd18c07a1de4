//! # タスクハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /tasks` - タスク作成
//! - `PATCH /tasks/{id}` - タスクの部分更新
//! - `GET /tasks?userEmail=...` - ユーザーのタスク一覧
//! - `DELETE /tasks/{id}` - タスク削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path,
        Query,
        State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;

use super::{
    document_from_body,
    response::{InsertResultDto, MessageResponse, UpdateResultDto},
};
use crate::{error::ApiError, usecase::TaskUseCaseImpl};

/// タスク API の共有状態
pub struct TaskState {
    pub usecase: TaskUseCaseImpl,
}

/// タスク一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    #[serde(rename = "userEmail")]
    pub user_email: Option<String>,
}

/// タスクを作成する
///
/// ## エンドポイント
/// POST /tasks
pub async fn create_task(
    State(state): State<Arc<TaskState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = document_from_body(body)?;

    let summary = state.usecase.create(fields).await?;

    Ok(Json(MessageResponse::with_result(
        "Task added successfully",
        InsertResultDto::from(summary),
    )))
}

/// タスクを部分更新する
///
/// ## エンドポイント
/// PATCH /tasks/{id}
pub async fn update_task(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = document_from_body(body)?;

    let summary = state.usecase.update(&id, fields).await?;

    Ok(Json(MessageResponse::with_result(
        "Task updated successfully",
        UpdateResultDto::from(summary),
    )))
}

/// ユーザーのタスク一覧を取得する
///
/// ## エンドポイント
/// GET /tasks?userEmail={email}
pub async fn list_tasks(
    State(state): State<Arc<TaskState>>,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Query(query) = query?;

    let tasks = state.usecase.list_by_user(query.user_email.as_deref()).await?;

    Ok(Json(tasks.iter().map(|t| t.to_json()).collect()))
}

/// タスクを削除する
///
/// ## エンドポイント
/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.usecase.delete(&id).await?;

    Ok(Json(MessageResponse::message_only(
        "Task deleted successfully",
    )))
}
