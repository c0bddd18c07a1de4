//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! taskmgmt-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! PostgreSQL 実装と同じ観測可能な挙動を持つ:
//!
//! - email の重複挿入は Conflict
//! - 同じ値での部分更新は「一致したが変更なし」（数値は `1` と `1.0` を同値とみなす）
//! - 一覧は識別子（生成順）の昇順
//!
//! [`set_unavailable`](MockTaskRepository::set_unavailable) で
//! ストアの障害を再現できる。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use taskmgmt_domain::{
    document::DocumentId,
    summary::{DeleteSummary, InsertSummary, UpdateSummary},
    task::{NewTask, Task, TaskPatch},
    user::{Email, NewUser, User},
};

use crate::{
    db::ReadinessCheck,
    error::InfraError,
    repository::{TaskRepository, UserRepository},
};

fn unavailable() -> InfraError {
    InfraError::unexpected("mock: store unavailable")
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users:       Arc<Mutex<Vec<User>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// 保存済みのユーザー数
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), InfraError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        self.check_available()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == Some(email.as_str()))
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<InsertSummary, InfraError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email() == Some(user.email().as_str())) {
            return Err(InfraError::conflict("User", user.email().as_str()));
        }
        users.push(user.clone().into_user());
        Ok(InsertSummary {
            inserted_id: *user.id(),
        })
    }

    async fn find_all(&self) -> Result<Vec<User>, InfraError> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by_key(|u| *u.id().as_uuid());
        Ok(users)
    }
}

// ===== MockTaskRepository =====

#[derive(Clone, Default)]
pub struct MockTaskRepository {
    tasks:       Arc<Mutex<Vec<Task>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// 識別子でタスクを取得する（テストの検証用）
    pub fn get(&self, id: &DocumentId) -> Option<Task> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned()
    }

    fn check_available(&self) -> Result<(), InfraError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn insert(&self, task: &NewTask) -> Result<InsertSummary, InfraError> {
        self.check_available()?;
        self.tasks.lock().unwrap().push(task.clone().into_task());
        Ok(InsertSummary {
            inserted_id: *task.id(),
        })
    }

    async fn update_fields(
        &self,
        id: &DocumentId,
        patch: &TaskPatch,
    ) -> Result<UpdateSummary, InfraError> {
        self.check_available()?;
        let mut tasks = self.tasks.lock().unwrap();
        let Some(task) = tasks.iter_mut().find(|t| t.id() == id) else {
            return Ok(UpdateSummary::default());
        };
        let modified = task.apply(patch);
        Ok(UpdateSummary {
            matched_count:  1,
            modified_count: u64::from(modified),
        })
    }

    async fn find_by_user_email(&self, user_email: &str) -> Result<Vec<Task>, InfraError> {
        self.check_available()?;
        let mut tasks: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_email() == Some(user_email))
            .cloned()
            .collect();
        tasks.sort_by_key(|t| *t.id().as_uuid());
        Ok(tasks)
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteSummary, InfraError> {
        self.check_available()?;
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id() != id);
        Ok(DeleteSummary {
            deleted_count: (before - tasks.len()) as u64,
        })
    }
}

// ===== MockReadinessCheck =====

/// 結果を固定できる疎通確認
#[derive(Clone)]
pub struct MockReadinessCheck {
    name:    &'static str,
    healthy: Arc<AtomicBool>,
}

impl MockReadinessCheck {
    pub fn new(name: &'static str, healthy: bool) -> Self {
        Self {
            name,
            healthy: Arc::new(AtomicBool::new(healthy)),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReadinessCheck for MockReadinessCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn check(&self) -> Result<(), InfraError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(unavailable())
        }
    }
}
