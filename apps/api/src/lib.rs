//! # TaskManagement API サーバー
//!
//! タスク管理フロントエンド向けの HTTP API。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Frontend  │────▶│ task-server │────▶│ PostgreSQL  │
//! │             │     │ (port 5001) │     │ users/tasks │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーター構築（CORS・リクエスト ID・トレース）
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - エンドポイントごとの処理
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use taskmgmt_api::{app_builder::{AppDependencies, build_app}, config::AppConfig};
//!
//! let config = AppConfig::from_env()?;
//! let app = build_app(&config, deps);
//! ```

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
