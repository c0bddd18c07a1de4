//! # JWT 発行
//!
//! リクエスト本文をクレームとしてアクセストークンに署名する。
//!
//! - アルゴリズム: HS256
//! - 有効期限: 発行から 1 時間（`iat` / `exp` を付与）
//! - 本文の内容は検証しない
//!
//! 署名鍵は起動時に渡す。未設定の場合もサーバーは起動し、
//! 発行時にエラーを返す。

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use taskmgmt_domain::document::Document;

use crate::error::InfraError;

/// トークンの有効期間
pub const TOKEN_TTL: Duration = Duration::hours(1);

/// トークン発行トレイト
pub trait TokenIssuer: Send + Sync {
    /// クレームに署名したトークン文字列を返す
    fn issue(&self, claims: &Document) -> Result<String, InfraError>;
}

/// HS256 で署名する TokenIssuer
#[derive(Clone)]
pub struct JwtTokenIssuer {
    secret: Option<String>,
}

impl JwtTokenIssuer {
    /// 署名鍵を指定して作成する
    ///
    /// 空文字列は未設定として扱う。
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// 署名鍵が設定されているか
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }
}

impl fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenIssuer")
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}

impl TokenIssuer for JwtTokenIssuer {
    #[tracing::instrument(skip_all, level = "debug")]
    fn issue(&self, claims: &Document) -> Result<String, InfraError> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| InfraError::unexpected("JWT_SECRET が設定されていません"))?;

        let issued_at = Utc::now();
        let expires_at = issued_at + TOKEN_TTL;

        let mut payload = claims.as_map().clone();
        payload.insert("iat".to_string(), Value::from(issued_at.timestamp()));
        payload.insert("exp".to_string(), Value::from(expires_at.timestamp()));

        let token = encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Map, json};

    use super::*;
    use crate::InfraErrorKind;

    const SECRET: &str = "test-secret";

    fn decode_claims(token: &str, secret: &str) -> Map<String, Value> {
        decode::<Map<String, Value>>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap()
        .claims
    }

    #[test]
    fn test_本文のクレームと有効期限が署名される() {
        let sut = JwtTokenIssuer::new(Some(SECRET.to_string()));
        let claims = Document::from_value(json!({ "email": "a@x.com", "role": "member" })).unwrap();

        let token = sut.issue(&claims).unwrap();

        let decoded = decode_claims(&token, SECRET);
        assert_eq!(decoded.get("email"), Some(&json!("a@x.com")));
        assert_eq!(decoded.get("role"), Some(&json!("member")));
        let iat = decoded["iat"].as_i64().unwrap();
        let exp = decoded["exp"].as_i64().unwrap();
        assert_eq!(exp - iat, 3600);
    }

    #[test]
    fn test_空の本文でもトークンを発行できる() {
        let sut = JwtTokenIssuer::new(Some(SECRET.to_string()));

        let token = sut.issue(&Document::new()).unwrap();

        let decoded = decode_claims(&token, SECRET);
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_別の鍵では検証できない() {
        let sut = JwtTokenIssuer::new(Some(SECRET.to_string()));

        let token = sut.issue(&Document::new()).unwrap();

        let result = decode::<Map<String, Value>>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }

    #[rstest]
    #[case::未設定(None)]
    #[case::空文字列(Some(String::new()))]
    fn test_署名鍵が無ければ発行に失敗する(#[case] secret: Option<String>) {
        let sut = JwtTokenIssuer::new(secret);

        let result = sut.issue(&Document::new());

        assert!(!sut.is_configured());
        assert!(matches!(
            result.unwrap_err().kind(),
            InfraErrorKind::Unexpected(_)
        ));
    }

    #[test]
    fn test_debug表示に署名鍵を含まない() {
        let sut = JwtTokenIssuer::new(Some(SECRET.to_string()));

        let debug = format!("{sut:?}");

        assert!(!debug.contains(SECRET));
    }
}
