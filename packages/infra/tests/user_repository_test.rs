//! UserRepository 統合テスト
//!
//! データベースを使用したテスト。sqlx::test マクロを使用して、
//! テストごとに使い捨てのデータベースを作成する。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p taskmgmt-infra --test user_repository_test
//! ```

use serde_json::json;
use sqlx::PgPool;
use taskmgmt_domain::{
    document::Document,
    user::{Email, NewUser},
};
use taskmgmt_infra::repository::{PostgresUserRepository, UserRepository};

fn new_user(value: serde_json::Value) -> NewUser {
    NewUser::new(Document::from_value(value).unwrap()).unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_挿入したユーザーをメールアドレスで取得できる(pool: PgPool) {
    let repo = PostgresUserRepository::new(pool);
    let user = new_user(json!({ "email": "a@x.com", "name": "A" }));

    let summary = repo.insert(&user).await.unwrap();
    let found = repo
        .find_by_email(&Email::new("a@x.com").unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.inserted_id, *user.id());
    assert_eq!(found.id(), user.id());
    assert_eq!(found.fields().get_str("name"), Some("A"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しないメールアドレスはnoneを返す(pool: PgPool) {
    let repo = PostgresUserRepository::new(pool);

    let found = repo
        .find_by_email(&Email::new("nobody@x.com").unwrap())
        .await
        .unwrap();

    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_同じメールアドレスの挿入は一意制約違反になる(pool: PgPool) {
    let repo = PostgresUserRepository::new(pool);
    repo.insert(&new_user(json!({ "email": "a@x.com" })))
        .await
        .unwrap();

    let result = repo.insert(&new_user(json!({ "email": "a@x.com" }))).await;

    assert!(result.unwrap_err().is_conflict());
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_全ユーザーを取得できる(pool: PgPool) {
    let repo = PostgresUserRepository::new(pool);
    repo.insert(&new_user(json!({ "email": "a@x.com" })))
        .await
        .unwrap();
    repo.insert(&new_user(json!({ "email": "b@x.com" })))
        .await
        .unwrap();

    let users = repo.find_all().await.unwrap();

    let emails: Vec<_> = users.iter().filter_map(|u| u.email()).collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
}
