//! # ドキュメント
//!
//! コレクションに格納される、スキーマを持たない JSON オブジェクトを表現する。
//!
//! ## 設計方針
//!
//! - **型付けは境界のみ**: フィールドの中身は検証せず、読む必要のある
//!   フィールドだけをアクセサで取り出す
//! - **識別子は予約フィールド**: `_id` はサーバーが採番し、保存時の本文には含めない。
//!   レスポンスでは [`Document::with_id`] で本文に合成して返す
//! - **マージはトップレベルのみ**: 部分更新は指定されたキーの値を丸ごと置き換える
//! - **NUL 文字は受け付けない**: JSONB に格納できないため、キー・文字列値に
//!   `\u0000` を含む本文は [`DomainError::Validation`] とする
//! - **数値は値で比較する**: `1` と `1.0` は同じ値として扱う（JSONB の等価性と同じ）

use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::DomainError;

/// 識別子を表す予約フィールド名
pub const ID_FIELD: &str = "_id";

define_uuid_id! {
    /// ドキュメント ID
    ///
    /// UUID v7 を使用し、生成順にソート可能。
    pub struct DocumentId;
}

impl DocumentId {
    /// 文字列から ID をパースする
    ///
    /// UUID として解釈できない場合は [`DomainError::MalformedId`] を返す。
    /// 形式が正しいかどうかだけを判定し、存在確認は行わない。
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        uuid::Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| DomainError::MalformedId(value.to_string()))
    }
}

impl FromStr for DocumentId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// スキーマを持たないドキュメント本体
///
/// # 不変条件
///
/// - `_id` フィールドを含まない
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// 空のドキュメントを作成する
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// JSON 値からドキュメントを作成する
    ///
    /// オブジェクト以外、またはネストを含めてどこかに NUL 文字を含む場合は
    /// [`DomainError::Validation`] になる。
    /// 呼び出し元が送った `_id` は取り除く。
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) if map.iter().any(|(k, v)| has_nul(k) || contains_nul(v)) => {
                Err(DomainError::Validation(
                    "Request body must not contain NUL characters".to_string(),
                ))
            }
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(DomainError::Validation(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }

    /// JSON オブジェクトからドキュメントを作成する
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        map.remove(ID_FIELD);
        Self(map)
    }

    /// フィールドの値を取得する
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// 文字列フィールドの値を取得する
    ///
    /// フィールドが存在しない、または文字列でない場合は `None`。
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// フィールドを設定する
    ///
    /// `_id` は予約フィールドのため無視し、`None` を返す。
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if key == ID_FIELD {
            return None;
        }
        self.0.insert(key, value)
    }

    /// フィールド数
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// フィールドが 1 つも無いか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `patch` のフィールドで上書きする
    ///
    /// 指定されていないフィールドはそのまま残る。
    /// 1 つでも値が変わった場合に `true` を返す。
    pub fn merge(&mut self, patch: &Document) -> bool {
        let mut changed = false;
        for (key, value) in &patch.0 {
            if !self.0.get(key).is_some_and(|current| json_eq(current, value)) {
                changed = true;
            }
            self.0.insert(key.clone(), value.clone());
        }
        changed
    }

    /// `_id` を合成した JSON 値を返す
    pub fn with_id(&self, id: &DocumentId) -> Value {
        let mut map = Map::with_capacity(self.0.len() + 1);
        map.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        map.extend(self.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Value::Object(map)
    }

    /// 内部の JSON オブジェクト参照を取得する
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// 内部の JSON オブジェクトに変換する
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

fn has_nul(s: &str) -> bool {
    s.contains('\0')
}

fn contains_nul(value: &Value) -> bool {
    match value {
        Value::String(s) => has_nul(s),
        Value::Array(items) => items.iter().any(contains_nul),
        Value::Object(map) => map.iter().any(|(k, v)| has_nul(k) || contains_nul(v)),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

/// JSONB と同じ等価性で比較する
///
/// 数値は表現（整数・浮動小数点）を問わず値で比較する。
fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| json_eq(x, y)))
        }
        _ => a == b,
    }
}

impl TryFrom<Value> for Document {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
