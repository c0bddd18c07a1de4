//! タスク管理ユースケース

use std::sync::Arc;

use taskmgmt_domain::{
    document::{Document, DocumentId},
    summary::{InsertSummary, UpdateSummary},
    task::{NewTask, Task, TaskPatch, TaskUpdateMode},
};
use taskmgmt_infra::repository::TaskRepository;

use crate::error::ApiError;

/// タスク管理ユースケース
pub struct TaskUseCaseImpl {
    task_repository: Arc<dyn TaskRepository>,
    update_mode:     TaskUpdateMode,
}

impl TaskUseCaseImpl {
    pub fn new(task_repository: Arc<dyn TaskRepository>, update_mode: TaskUpdateMode) -> Self {
        Self {
            task_repository,
            update_mode,
        }
    }

    /// タスクを作成する
    ///
    /// 本文はそのまま保存する。`userEmail` の有無は検証しない。
    pub async fn create(&self, fields: Document) -> Result<InsertSummary, ApiError> {
        let task = NewTask::new(fields);
        if task.user_email().is_none() {
            tracing::debug!(id = %task.id(), "userEmail の無いタスクを作成します");
        }

        self.task_repository
            .insert(&task)
            .await
            .map_err(ApiError::internal("Failed to add task"))
    }

    /// タスクを部分更新する
    ///
    /// 対象が存在しない場合と、値が変わらなかった場合はどちらも 404。
    /// 更新するフィールドが無い本文も「変更なし」として扱う。
    pub async fn update(&self, id: &str, body: Document) -> Result<UpdateSummary, ApiError> {
        let id = DocumentId::parse(id)?;
        let patch = TaskPatch::from_document(body, self.update_mode);
        if patch.is_empty() {
            tracing::debug!(%id, mode = %self.update_mode, "更新するフィールドがありません");
            return Err(not_modified());
        }

        let summary = self
            .task_repository
            .update_fields(&id, &patch)
            .await
            .map_err(ApiError::internal("Failed to update task"))?;

        if !summary.is_modified() {
            return Err(not_modified());
        }
        Ok(summary)
    }

    /// ユーザーのタスク一覧を取得する
    ///
    /// `userEmail` が未指定・空文字列の場合は 400。
    pub async fn list_by_user(&self, user_email: Option<&str>) -> Result<Vec<Task>, ApiError> {
        let user_email = user_email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ApiError::BadRequest("User email is required".to_string()))?;

        let tasks = self
            .task_repository
            .find_by_user_email(user_email)
            .await
            .map_err(ApiError::internal("Internal server error"))?;

        if tasks.is_empty() {
            tracing::warn!(%user_email, "タスクが見つかりません");
        }
        Ok(tasks)
    }

    /// タスクを削除する
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let id = DocumentId::parse(id)?;

        let summary = self
            .task_repository
            .delete(&id)
            .await
            .map_err(ApiError::internal("Failed to delete task"))?;

        if !summary.is_deleted() {
            return Err(ApiError::NotFound("Task not found".to_string()));
        }
        Ok(())
    }
}

fn not_modified() -> ApiError {
    ApiError::NotFound("Task not found or not modified".to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use taskmgmt_infra::mock::MockTaskRepository;

    use super::*;

    fn doc(value: serde_json::Value) -> Document {
        Document::from_value(value).unwrap()
    }

    fn setup(mode: TaskUpdateMode) -> (TaskUseCaseImpl, MockTaskRepository) {
        let repo = MockTaskRepository::new();
        (TaskUseCaseImpl::new(Arc::new(repo.clone()), mode), repo)
    }

    #[tokio::test]
    async fn test_作成したタスクは所有者のメールアドレスでのみ一覧される() {
        let (sut, _repo) = setup(TaskUpdateMode::Merge);
        let created = sut
            .create(doc(json!({ "userEmail": "a@x.com", "title": "t1" })))
            .await
            .unwrap();

        let own = sut.list_by_user(Some("a@x.com")).await.unwrap();
        let other = sut.list_by_user(Some("b@x.com")).await.unwrap();

        assert_eq!(own.len(), 1);
        assert_eq!(own[0].id(), &created.inserted_id);
        assert!(other.is_empty());
    }

    #[rstest]
    #[case::未指定(None)]
    #[case::空文字列(Some(""))]
    #[tokio::test]
    async fn test_user_emailが無ければbad_request(#[case] user_email: Option<&str>) {
        let (sut, _repo) = setup(TaskUpdateMode::Merge);

        let result = sut.list_by_user(user_email).await;

        assert!(matches!(result, Err(ApiError::BadRequest(msg)) if msg == "User email is required"));
    }

    #[tokio::test]
    async fn test_部分更新は指定フィールドのみ変更する() {
        let (sut, repo) = setup(TaskUpdateMode::Merge);
        let created = sut
            .create(doc(json!({ "userEmail": "a@x.com", "title": "t1", "category": "todo" })))
            .await
            .unwrap();

        let summary = sut
            .update(
                &created.inserted_id.to_string(),
                doc(json!({ "category": "done" })),
            )
            .await
            .unwrap();

        assert_eq!(summary.modified_count, 1);
        let stored = repo.get(&created.inserted_id).unwrap();
        assert_eq!(stored.fields().get_str("title"), Some("t1"));
        assert_eq!(stored.fields().get_str("category"), Some("done"));
        assert_eq!(stored.user_email(), Some("a@x.com"));
    }

    #[tokio::test]
    async fn test_同じ値での更新はnot_found() {
        let (sut, _repo) = setup(TaskUpdateMode::Merge);
        let created = sut
            .create(doc(json!({ "userEmail": "a@x.com", "category": "todo" })))
            .await
            .unwrap();

        let result = sut
            .update(
                &created.inserted_id.to_string(),
                doc(json!({ "category": "todo" })),
            )
            .await;

        assert!(
            matches!(result, Err(ApiError::NotFound(msg)) if msg == "Task not found or not modified")
        );
    }

    #[tokio::test]
    async fn test_存在しないタスクの更新はnot_found() {
        let (sut, _repo) = setup(TaskUpdateMode::Merge);

        let result = sut
            .update(&DocumentId::new().to_string(), doc(json!({ "category": "done" })))
            .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_categoryモードはcategory以外を無視する() {
        let (sut, repo) = setup(TaskUpdateMode::Category);
        let created = sut
            .create(doc(json!({ "userEmail": "a@x.com", "title": "t1", "category": "todo" })))
            .await
            .unwrap();
        let id = created.inserted_id.to_string();

        sut.update(&id, doc(json!({ "category": "done", "title": "t2" })))
            .await
            .unwrap();
        let without_category = sut.update(&id, doc(json!({ "title": "t3" }))).await;

        let stored = repo.get(&created.inserted_id).unwrap();
        assert_eq!(stored.fields().get_str("category"), Some("done"));
        assert_eq!(stored.fields().get_str("title"), Some("t1"));
        assert!(matches!(without_category, Err(ApiError::NotFound(_))));
    }

    #[rstest]
    #[case::不正な識別子("not-an-id")]
    #[case::空文字列("")]
    #[tokio::test]
    async fn test_不正な識別子はbad_request(#[case] id: &str) {
        let (sut, _repo) = setup(TaskUpdateMode::Merge);

        let update = sut.update(id, doc(json!({ "category": "done" }))).await;
        let delete = sut.delete(id).await;

        assert!(matches!(update, Err(ApiError::BadRequest(_))));
        assert!(matches!(delete, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_削除は2回目にnot_found() {
        let (sut, _repo) = setup(TaskUpdateMode::Merge);
        let created = sut
            .create(doc(json!({ "userEmail": "a@x.com" })))
            .await
            .unwrap();
        let id = created.inserted_id.to_string();

        let first = sut.delete(&id).await;
        let second = sut.delete(&id).await;

        assert!(first.is_ok());
        assert!(matches!(second, Err(ApiError::NotFound(msg)) if msg == "Task not found"));
    }

    #[tokio::test]
    async fn test_ストア障害はエンドポイントごとの内部エラー() {
        let (sut, repo) = setup(TaskUpdateMode::Merge);
        repo.set_unavailable(true);
        let id = DocumentId::new().to_string();

        let create = sut.create(doc(json!({ "userEmail": "a@x.com" }))).await;
        let update = sut.update(&id, doc(json!({ "category": "done" }))).await;
        let list = sut.list_by_user(Some("a@x.com")).await;
        let delete = sut.delete(&id).await;

        assert!(matches!(create, Err(ApiError::Internal { message: "Failed to add task", .. })));
        assert!(matches!(update, Err(ApiError::Internal { message: "Failed to update task", .. })));
        assert!(matches!(list, Err(ApiError::Internal { message: "Internal server error", .. })));
        assert!(matches!(delete, Err(ApiError::Internal { message: "Failed to delete task", .. })));
    }
}
