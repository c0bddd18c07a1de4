//! # タスク
//!
//! `Tasks` コレクションに格納されるタスクドキュメントと、その部分更新を定義する。
//!
//! ## 設計方針
//!
//! - `userEmail` はユーザーとの関連付けに使うが、外部キーとしては扱わない
//!   （存在しないユーザーのメールアドレスでも作成できる）
//! - 部分更新の適用範囲は [`TaskUpdateMode`] で切り替える
//! - 並行更新は後勝ち（バージョン管理なし）

use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};

use crate::document::{Document, DocumentId};

/// ユーザーとの関連付けに使うフィールド名
pub const USER_EMAIL_FIELD: &str = "userEmail";

/// `category` モードで更新対象となるフィールド名
pub const CATEGORY_FIELD: &str = "category";

/// 部分更新の適用範囲
///
/// | モード | 挙動 |
/// |--------|------|
/// | `merge` | 本文のすべてのフィールドをマージする |
/// | `category` | 本文の `category` フィールドのみを反映する |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum TaskUpdateMode {
    #[default]
    Merge,
    Category,
}

/// 作成前のタスク
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    id:     DocumentId,
    fields: Document,
}

impl NewTask {
    /// 作成リクエストの本文からタスクを作成する
    ///
    /// `userEmail` の有無は検証しない。
    pub fn new(fields: Document) -> Self {
        Self {
            id: DocumentId::new(),
            fields,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    pub fn user_email(&self) -> Option<&str> {
        self.fields.get_str(USER_EMAIL_FIELD)
    }

    /// 永続化済みのタスクに変換する
    pub fn into_task(self) -> Task {
        Task {
            id:     self.id,
            fields: self.fields,
        }
    }
}

/// タスクドキュメント
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id:     DocumentId,
    fields: Document,
}

impl Task {
    /// データベースから取得したデータでタスクを復元する
    pub fn from_db(id: DocumentId, fields: Document) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    /// 所有者のメールアドレス
    pub fn user_email(&self) -> Option<&str> {
        self.fields.get_str(USER_EMAIL_FIELD)
    }

    /// 部分更新を適用する
    ///
    /// 値が変わった場合に `true` を返す。
    pub fn apply(&mut self, patch: &TaskPatch) -> bool {
        self.fields.merge(&patch.0)
    }

    /// `_id` を含むレスポンス用 JSON に変換する
    pub fn to_json(&self) -> Value {
        self.fields.with_id(&self.id)
    }
}

/// タスクの部分更新
///
/// 含まれるフィールドだけが既存ドキュメントに上書きされる。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskPatch(Document);

impl TaskPatch {
    /// 更新リクエストの本文から、モードに応じた部分更新を作成する
    pub fn from_document(body: Document, mode: TaskUpdateMode) -> Self {
        match mode {
            TaskUpdateMode::Merge => Self(body),
            TaskUpdateMode::Category => {
                let mut fields = Document::new();
                if let Some(category) = body.get(CATEGORY_FIELD) {
                    fields.insert(CATEGORY_FIELD, category.clone());
                }
                Self(fields)
            }
        }
    }

    /// 更新するフィールドが無いか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Document {
        &self.0
    }
}
