//! # ドメイン層エラー定義
//!
//! ドキュメントの形式違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 本文がオブジェクトでない、必須フィールドの欠落 |
//! | `MalformedId` | 400 Bad Request | 識別子の形式が不正 |
//!
//! 「存在しない」は形式違反ではないため、ここでは表現しない。
//! 存在確認の結果はリポジトリの戻り値（`Option` や件数）で返される。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// システムが読むフィールドの形式が期待と異なる場合に使用する。
    /// メッセージはそのままクライアントへ返せる短い英文とする。
    #[error("{0}")]
    Validation(String),

    /// 識別子の形式が不正
    ///
    /// 形式として正しいが存在しない識別子とは区別する。
    #[error("Invalid id: {0}")]
    MalformedId(String),
}
