//! # 書き込み結果
//!
//! リポジトリの書き込み操作が返す件数情報。
//! API 層はこれをレスポンスの `result` に変換する。

use crate::document::DocumentId;

/// 挿入結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertSummary {
    pub inserted_id: DocumentId,
}

/// 部分更新の結果
///
/// `matched_count` は識別子に一致したドキュメント数、
/// `modified_count` は実際に値が変わったドキュメント数。
/// 既存と同じ値で更新した場合は一致しても変更されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    pub matched_count:  u64,
    pub modified_count: u64,
}

impl UpdateSummary {
    /// 1 件以上変更されたか
    pub fn is_modified(&self) -> bool {
        self.modified_count > 0
    }
}

/// 削除結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteSummary {
    pub deleted_count: u64,
}

impl DeleteSummary {
    /// 1 件以上削除されたか
    pub fn is_deleted(&self) -> bool {
        self.deleted_count > 0
    }
}
