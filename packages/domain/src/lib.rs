//! # TaskManagement ドメイン層
//!
//! ユーザーとタスクを表すドキュメントモデルを定義する。
//!
//! ## 設計方針
//!
//! ドキュメントはスキーマを持たない JSON オブジェクトとして扱う。
//! システムが読むフィールド（`email`、`userEmail`、識別子の形式）だけを
//! 型で検証し、それ以外の呼び出し元フィールドはそのまま保持する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`document`] - ドキュメント本体と識別子
//! - [`user`] - ユーザードキュメント
//! - [`task`] - タスクドキュメントと部分更新
//! - [`summary`] - 書き込み操作の結果
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use serde_json::json;
//! use taskmgmt_domain::{document::Document, user::NewUser};
//!
//! let doc = Document::from_value(json!({ "email": "a@x.com", "name": "A" })).unwrap();
//! let user = NewUser::new(doc).unwrap();
//! assert_eq!(user.email().as_str(), "a@x.com");
//! ```

#[macro_use]
mod macros;

pub mod document;
pub mod error;
pub mod summary;
pub mod task;
pub mod user;

pub use error::DomainError;
