//! 書き込み系エンドポイントの共通レスポンス DTO
//!
//! クライアントはドキュメントストアの書き込み結果と同じ形
//! （`acknowledged`, `insertedId` など）を期待している。

use serde::Serialize;
use taskmgmt_domain::summary::{InsertSummary, UpdateSummary};

/// `{"message": ..., "result": ...}` 形式のレスポンス
#[derive(Debug, Serialize)]
pub struct MessageResponse<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result:  Option<T>,
}

impl<T> MessageResponse<T> {
    pub fn with_result(message: &'static str, result: T) -> Self {
        Self {
            message,
            result: Some(result),
        }
    }
}

impl MessageResponse<()> {
    pub fn message_only(message: &'static str) -> Self {
        Self {
            message,
            result: None,
        }
    }
}

/// 挿入結果 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResultDto {
    pub acknowledged: bool,
    pub inserted_id:  String,
}

impl From<InsertSummary> for InsertResultDto {
    fn from(summary: InsertSummary) -> Self {
        Self {
            acknowledged: true,
            inserted_id:  summary.inserted_id.to_string(),
        }
    }
}

/// 更新結果 DTO
///
/// upsert は行わないため `upsertedId` は常に `null`。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResultDto {
    pub acknowledged:   bool,
    pub matched_count:  u64,
    pub modified_count: u64,
    pub upserted_id:    Option<String>,
    pub upserted_count: u64,
}

impl From<UpdateSummary> for UpdateResultDto {
    fn from(summary: UpdateSummary) -> Self {
        Self {
            acknowledged:   true,
            matched_count:  summary.matched_count,
            modified_count: summary.modified_count,
            upserted_id:    None,
            upserted_count: 0,
        }
    }
}
