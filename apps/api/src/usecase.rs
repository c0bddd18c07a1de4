//! # ユースケース層
//!
//! リポジトリを組み合わせて各エンドポイントの処理を実行する。
//! 失敗はここで [`ApiError`](crate::error::ApiError) に変換し、
//! ハンドラはレスポンスの組み立てに専念する。

pub mod task;
pub mod user;

pub use task::TaskUseCaseImpl;
pub use user::UserUseCaseImpl;
