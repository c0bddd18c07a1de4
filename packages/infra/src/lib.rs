//! # TaskManagement インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: `Users` / `Tasks` コレクションへの読み書き
//! - **トークン発行**: JWT の署名
//!
//! ## ドキュメントストアとしての PostgreSQL
//!
//! 各コレクションは `(id UUID, doc JSONB)` のテーブルで表現する。
//! フィールドの一致検索は `doc->>'field'`、部分更新は JSONB の `||` 演算子で行う。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - [`token`] - JWT 発行
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use taskmgmt_infra::{db, repository::PostgresTaskRepository};
//!
//! let pool = db::create_pool("postgres://localhost/task_management").await?;
//! db::run_migrations(&pool).await?;
//! let tasks = PostgresTaskRepository::new(pool.clone());
//! ```

pub mod db;
pub mod error;
pub mod repository;
pub mod token;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
pub use token::{JwtTokenIssuer, TokenIssuer};
