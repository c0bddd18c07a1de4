//! # ユーザー
//!
//! `Users` コレクションに格納されるユーザードキュメントを定義する。
//!
//! ## 不変条件
//!
//! - `email` はコレクション内で一意
//! - 作成後に更新・削除されない
//!
//! `email` 以外のフィールドは呼び出し元が自由に指定でき、検証しない。

use serde_json::Value;

use crate::{
    DomainError,
    document::{Document, DocumentId},
};

/// 一意キーとして使われるフィールド名
pub const EMAIL_FIELD: &str = "email";

/// メールアドレス（値オブジェクト）
///
/// 完全一致の検索キーとして使うため、大文字小文字の正規化や前後の空白除去は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// 空文字列は [`DomainError::Validation`] になる。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("User email is required".to_string()));
        }
        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 登録前のユーザー
///
/// 識別子は生成時に採番する。
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    id:     DocumentId,
    email:  Email,
    fields: Document,
}

impl NewUser {
    /// 登録リクエストの本文からユーザーを作成する
    ///
    /// `email` が文字列として存在しない場合は [`DomainError::Validation`]。
    pub fn new(fields: Document) -> Result<Self, DomainError> {
        let email = fields
            .get_str(EMAIL_FIELD)
            .ok_or_else(|| DomainError::Validation("User email is required".to_string()))
            .and_then(Email::new)?;

        Ok(Self {
            id: DocumentId::new(),
            email,
            fields,
        })
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    /// 永続化済みのユーザーに変換する
    pub fn into_user(self) -> User {
        User {
            id:     self.id,
            fields: self.fields,
        }
    }
}

/// ユーザードキュメント
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id:     DocumentId,
    fields: Document,
}

impl User {
    /// データベースから取得したデータでユーザーを復元する
    pub fn from_db(id: DocumentId, fields: Document) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    /// 保存されている `email`
    pub fn email(&self) -> Option<&str> {
        self.fields.get_str(EMAIL_FIELD)
    }

    /// `_id` を含むレスポンス用 JSON に変換する
    pub fn to_json(&self) -> Value {
        self.fields.with_id(&self.id)
    }
}
