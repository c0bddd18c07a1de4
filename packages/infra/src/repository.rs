//! # リポジトリ実装
//!
//! `Users` / `Tasks` コレクションへの読み書きを提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイトに依存し、具体実装は起動時に注入する
//! - **1 操作 1 クエリ**: 各メソッドは単一の SQL 文で完結し、トランザクションを張らない
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod task_repository;
pub mod user_repository;

use serde_json::{Map, Value};
use sqlx::types::Json;
use taskmgmt_domain::document::{Document, DocumentId};
use uuid::Uuid;

pub use task_repository::{PostgresTaskRepository, TaskRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};

/// コレクションテーブルの 1 行
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct DocumentRow {
    id:  Uuid,
    doc: Json<Map<String, Value>>,
}

impl DocumentRow {
    pub(crate) fn into_parts(self) -> (DocumentId, Document) {
        (DocumentId::from_uuid(self.id), Document::from_map(self.doc.0))
    }
}

/// `COUNT(*)` / `rows_affected` の値を件数に変換する
pub(crate) fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}
