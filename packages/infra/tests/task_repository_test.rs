//! TaskRepository 統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p taskmgmt-infra --test task_repository_test
//! ```

use serde_json::json;
use sqlx::PgPool;
use taskmgmt_domain::{
    document::{Document, DocumentId},
    summary::UpdateSummary,
    task::{NewTask, TaskPatch, TaskUpdateMode},
};
use taskmgmt_infra::repository::{PostgresTaskRepository, TaskRepository};

fn doc(value: serde_json::Value) -> Document {
    Document::from_value(value).unwrap()
}

fn merge_patch(value: serde_json::Value) -> TaskPatch {
    TaskPatch::from_document(doc(value), TaskUpdateMode::Merge)
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_タスクはuser_emailごとに一覧できる(pool: PgPool) {
    let repo = PostgresTaskRepository::new(pool);
    let first = NewTask::new(doc(json!({ "userEmail": "a@x.com", "title": "t1" })));
    let second = NewTask::new(doc(json!({ "userEmail": "a@x.com", "title": "t2" })));
    let other = NewTask::new(doc(json!({ "userEmail": "b@x.com", "title": "t3" })));
    for task in [&first, &second, &other] {
        repo.insert(task).await.unwrap();
    }

    let tasks = repo.find_by_user_email("a@x.com").await.unwrap();

    let ids: Vec<_> = tasks.iter().map(|t| *t.id()).collect();
    assert_eq!(ids, vec![*first.id(), *second.id()]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_部分更新は指定フィールドのみ変更する(pool: PgPool) {
    let repo = PostgresTaskRepository::new(pool);
    let task = NewTask::new(doc(json!({ "userEmail": "a@x.com", "title": "t1", "category": "todo" })));
    repo.insert(&task).await.unwrap();

    let summary = repo
        .update_fields(task.id(), &merge_patch(json!({ "category": "done" })))
        .await
        .unwrap();

    assert_eq!(
        summary,
        UpdateSummary {
            matched_count:  1,
            modified_count: 1,
        }
    );
    let stored = repo.find_by_user_email("a@x.com").await.unwrap();
    assert_eq!(stored[0].fields().get_str("title"), Some("t1"));
    assert_eq!(stored[0].fields().get_str("category"), Some("done"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_同じ値での更新は変更なしと報告する(pool: PgPool) {
    let repo = PostgresTaskRepository::new(pool);
    let task = NewTask::new(doc(json!({ "userEmail": "a@x.com", "category": "todo" })));
    repo.insert(&task).await.unwrap();

    let summary = repo
        .update_fields(task.id(), &merge_patch(json!({ "category": "todo" })))
        .await
        .unwrap();

    assert_eq!(summary.matched_count, 1);
    assert!(!summary.is_modified());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_整数と浮動小数点で同値の更新は変更なしと報告する(pool: PgPool) {
    let repo = PostgresTaskRepository::new(pool);
    let task = NewTask::new(doc(json!({ "userEmail": "a@x.com", "priority": 1 })));
    repo.insert(&task).await.unwrap();

    let summary = repo
        .update_fields(task.id(), &merge_patch(json!({ "priority": 1.0 })))
        .await
        .unwrap();

    assert_eq!(summary.matched_count, 1);
    assert!(!summary.is_modified());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しないタスクの更新は一致0件(pool: PgPool) {
    let repo = PostgresTaskRepository::new(pool);

    let summary = repo
        .update_fields(&DocumentId::new(), &merge_patch(json!({ "category": "done" })))
        .await
        .unwrap();

    assert_eq!(summary, UpdateSummary::default());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_削除は2回目には0件になる(pool: PgPool) {
    let repo = PostgresTaskRepository::new(pool);
    let task = NewTask::new(doc(json!({ "userEmail": "a@x.com" })));
    repo.insert(&task).await.unwrap();

    let first = repo.delete(task.id()).await.unwrap();
    let second = repo.delete(task.id()).await.unwrap();

    assert!(first.is_deleted());
    assert!(!second.is_deleted());
    assert!(repo.find_by_user_email("a@x.com").await.unwrap().is_empty());
}
