//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API クレートの責務（shared に axum 依存を入れない）
//! - 本文は短いメッセージを 1 フィールドだけ持つ JSON オブジェクト
//!
//! ## 形式
//!
//! クライアントが参照するキーはエンドポイントごとに固定されている:
//!
//! ```json
//! { "error": "Task not found" }
//! { "message": "User already exists" }
//! ```

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// `error` と `message` のどちらか一方だけがシリアライズされる。
/// 内部エラーの詳細（スタックトレース、SQL など）は決して含めない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error:   Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// `{"error": ...}` 形式のレスポンスを作成する
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            error:   Some(detail.into()),
            message: None,
        }
    }

    /// `{"message": ...}` 形式のレスポンスを作成する
    ///
    /// 重複登録（409）のように、クライアントが `message` を読む応答で使用する。
    pub fn message(detail: impl Into<String>) -> Self {
        Self {
            error:   None,
            message: Some(detail.into()),
        }
    }

    /// 設定されているメッセージを取得する
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_errorはerrorキーのみをシリアライズする() {
        let json = serde_json::to_value(ErrorResponse::error("Task not found")).unwrap();

        assert_eq!(json, serde_json::json!({ "error": "Task not found" }));
    }

    #[test]
    fn test_messageはmessageキーのみをシリアライズする() {
        let json = serde_json::to_value(ErrorResponse::message("User already exists")).unwrap();

        assert_eq!(json, serde_json::json!({ "message": "User already exists" }));
    }

    #[test]
    fn test_jsonデシリアライズで欠けたキーはnoneになる() {
        let error: ErrorResponse = serde_json::from_str(r#"{"error": "見つかりません"}"#).unwrap();

        assert_eq!(error.error.as_deref(), Some("見つかりません"));
        assert_eq!(error.message, None);
        assert_eq!(error.text(), Some("見つかりません"));
    }
}
