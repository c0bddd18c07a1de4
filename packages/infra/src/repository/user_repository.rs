//! # UserRepository
//!
//! `Users` コレクションの永続化を担当するリポジトリ。
//!
//! email の一意性は `users_email_key` 一意インデックスで保証する。
//! 重複チェックと挿入の間に別リクエストが割り込んだ場合も、
//! 挿入が一意制約違反となり [`InfraError::conflict`] が返る。

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};
use taskmgmt_domain::{
    summary::InsertSummary,
    user::{Email, NewUser, User},
};

use super::DocumentRow;
use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// メールアドレスでユーザーを検索する（完全一致）
    ///
    /// 見つからない場合は `Ok(None)`。
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError>;

    /// ユーザーを挿入する
    ///
    /// 同じ email のユーザーが既に存在する場合は Conflict エラーを返す。
    async fn insert(&self, user: &NewUser) -> Result<InsertSummary, InfraError>;

    /// すべてのユーザーを取得する
    async fn find_all(&self) -> Result<Vec<User>, InfraError>;
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%email))]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, doc
            FROM users
            WHERE doc->>'email' = $1
            LIMIT 1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            let (id, fields) = row.into_parts();
            User::from_db(id, fields)
        }))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %user.id()))]
    async fn insert(&self, user: &NewUser) -> Result<InsertSummary, InfraError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, doc)
            VALUES ($1, $2)
            "#,
        )
        .bind(*user.id().as_uuid())
        .bind(Json(user.fields()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertSummary {
                inserted_id: *user.id(),
            }),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(InfraError::conflict("User", user.email().as_str()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<User>, InfraError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, doc
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let (id, fields) = row.into_parts();
                User::from_db(id, fields)
            })
            .collect())
    }
}
