//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、処理はユースケース層に委譲
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── health.rs   # 稼働確認
//!     ├── response.rs # 書き込み系の共通レスポンス DTO
//!     ├── task.rs     # /tasks
//!     ├── token.rs    # /jwt
//!     └── user.rs     # /users
//! ```

pub mod health;
pub mod response;
pub mod task;
pub mod token;
pub mod user;

pub use health::{ReadinessState, health_check, readiness_check, root};
pub use task::{TaskState, create_task, delete_task, list_tasks, update_task};
pub use token::{TokenState, issue_token};
pub use user::{UserState, create_user, list_users};

use axum::{Json, extract::rejection::JsonRejection};
use serde_json::Value;
use taskmgmt_domain::document::Document;

use crate::error::ApiError;

/// リクエスト本文をドキュメントとして取り出す
///
/// JSON として読めない本文と、オブジェクト以外の本文は 400。
pub(crate) fn document_from_body(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Document, ApiError> {
    let Json(value) = body?;
    Document::from_value(value).map_err(ApiError::from)
}
