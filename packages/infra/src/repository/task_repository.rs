//! # TaskRepository
//!
//! `Tasks` コレクションの永続化を担当するリポジトリ。
//!
//! ## 部分更新
//!
//! JSONB の `||` 演算子でトップレベルのキーを上書きする。
//! 上書き後の値が既存と同じ場合は「一致したが変更なし」として数える。
//! 後勝ちで、バージョンによる競合検出は行わない。

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};
use taskmgmt_domain::{
    document::DocumentId,
    summary::{DeleteSummary, InsertSummary, UpdateSummary},
    task::{NewTask, Task, TaskPatch},
};

use super::{DocumentRow, to_count};
use crate::error::InfraError;

/// タスクリポジトリトレイト
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// タスクを挿入する
    async fn insert(&self, task: &NewTask) -> Result<InsertSummary, InfraError>;

    /// 既存タスクに部分更新をマージする
    ///
    /// 識別子に一致するタスクが無い場合もエラーにはせず、
    /// `matched_count = 0` の結果を返す。
    async fn update_fields(
        &self,
        id: &DocumentId,
        patch: &TaskPatch,
    ) -> Result<UpdateSummary, InfraError>;

    /// `userEmail` が完全一致するタスクを取得する
    async fn find_by_user_email(&self, user_email: &str) -> Result<Vec<Task>, InfraError>;

    /// タスクを削除する
    async fn delete(&self, id: &DocumentId) -> Result<DeleteSummary, InfraError>;
}

/// PostgreSQL 実装の TaskRepository
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(id = %task.id()))]
    async fn insert(&self, task: &NewTask) -> Result<InsertSummary, InfraError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, doc)
            VALUES ($1, $2)
            "#,
        )
        .bind(*task.id().as_uuid())
        .bind(Json(task.fields()))
        .execute(&self.pool)
        .await?;

        Ok(InsertSummary {
            inserted_id: *task.id(),
        })
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update_fields(
        &self,
        id: &DocumentId,
        patch: &TaskPatch,
    ) -> Result<UpdateSummary, InfraError> {
        let (matched, modified) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            WITH target AS (
                SELECT id, doc
                FROM tasks
                WHERE id = $1
            ),
            updated AS (
                UPDATE tasks
                SET doc = tasks.doc || $2::jsonb
                FROM target
                WHERE tasks.id = target.id
                  AND (target.doc || $2::jsonb) IS DISTINCT FROM target.doc
                RETURNING tasks.id
            )
            SELECT
                (SELECT COUNT(*) FROM target) AS matched_count,
                (SELECT COUNT(*) FROM updated) AS modified_count
            "#,
        )
        .bind(*id.as_uuid())
        .bind(Json(patch.fields()))
        .fetch_one(&self.pool)
        .await?;

        Ok(UpdateSummary {
            matched_count:  to_count(matched),
            modified_count: to_count(modified),
        })
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_email))]
    async fn find_by_user_email(&self, user_email: &str) -> Result<Vec<Task>, InfraError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, doc
            FROM tasks
            WHERE doc->>'userEmail' = $1
            ORDER BY id
            "#,
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let (id, fields) = row.into_parts();
                Task::from_db(id, fields)
            })
            .collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &DocumentId) -> Result<DeleteSummary, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(DeleteSummary {
            deleted_count: result.rows_affected(),
        })
    }
}
