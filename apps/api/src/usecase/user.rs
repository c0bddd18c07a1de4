//! ユーザー登録・一覧ユースケース

use std::sync::Arc;

use taskmgmt_domain::{
    document::Document,
    summary::InsertSummary,
    user::{NewUser, User},
};
use taskmgmt_infra::repository::UserRepository;

use crate::error::ApiError;

const DUPLICATE_USER: &str = "User already exists";

/// ユーザー管理ユースケース
pub struct UserUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
}

impl UserUseCaseImpl {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// ユーザーを登録する
    ///
    /// 1. 本文から `email` を取り出す（無ければ 400）
    /// 2. 同じ email のユーザーがいれば 409
    /// 3. 挿入（検索後に割り込まれた重複は一意制約で 409）
    pub async fn register(&self, fields: Document) -> Result<InsertSummary, ApiError> {
        let user = NewUser::new(fields)?;

        let existing = self
            .user_repository
            .find_by_email(user.email())
            .await
            .map_err(ApiError::internal("Failed to add user"))?;
        if existing.is_some() {
            tracing::warn!(email = %user.email(), "登録済みのメールアドレスです");
            return Err(ApiError::Conflict(DUPLICATE_USER.to_string()));
        }

        let summary = self.user_repository.insert(&user).await.map_err(|e| {
            if e.is_conflict() {
                tracing::warn!(email = %user.email(), "登録が競合しました");
                ApiError::Conflict(DUPLICATE_USER.to_string())
            } else {
                ApiError::internal("Failed to add user")(e)
            }
        })?;

        tracing::debug!(id = %summary.inserted_id, "ユーザーを登録しました");
        Ok(summary)
    }

    /// すべてのユーザーを取得する
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.user_repository
            .find_all()
            .await
            .map_err(ApiError::internal("Failed to fetch data"))
    }
}
