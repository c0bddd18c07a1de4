//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `PORT` | No | `5001` | ポート番号 |
//! | `DATABASE_URL` | ※ | - | PostgreSQL 接続 URL |
//! | `DB_USER` / `DB_PASS` | ※ | - | `DATABASE_URL` が無い場合の認証情報 |
//! | `DB_HOST` | No | `localhost` | `DATABASE_URL` が無い場合の接続先 |
//! | `DB_NAME` | No | `task_management` | `DATABASE_URL` が無い場合のデータベース名 |
//! | `JWT_SECRET` | No | - | トークン署名鍵（未設定時は発行時にエラー） |
//! | `CORS_ALLOWED_ORIGINS` | No | 下記 | 許可するオリジン（カンマ区切り） |
//! | `TASK_UPDATE_MODE` | No | `merge` | タスク部分更新のモード（`merge` / `category`） |
//!
//! ※ `DATABASE_URL` か `DB_*` のいずれかで接続先を指定する。
//! 認証情報の欠落は起動時の接続エラーとして表面化する。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use taskmgmt_api::config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("サーバー: {}:{}", config.host, config.port);
//! ```

use std::{env, fmt};

use taskmgmt_domain::task::TaskUpdateMode;
use thiserror::Error;

/// `CORS_ALLOWED_ORIGINS` 未設定時に許可するオリジン
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = [
    "http://localhost:5173",
    "https://taskmanagement-cf552.web.app",
];

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_NAME: &str = "task_management";

/// 設定の読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("PORT が不正です: {0}")]
    InvalidPort(String),

    #[error("TASK_UPDATE_MODE が不正です: {0}（merge または category を指定）")]
    InvalidUpdateMode(String),
}

/// アプリケーション全体の設定
///
/// 起動時に一度だけ構築し、各コンポーネントに渡す。
#[derive(Clone)]
pub struct AppConfig {
    /// バインドアドレス
    pub host:                 String,
    /// ポート番号
    pub port:                 u16,
    /// PostgreSQL 接続 URL
    pub database_url:         String,
    /// JWT 署名鍵
    pub jwt_secret:           Option<String>,
    /// CORS で許可するオリジン
    pub cors_allowed_origins: Vec<String>,
    /// タスク部分更新のモード
    pub task_update_mode:     TaskUpdateMode,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let task_update_mode = match var("TASK_UPDATE_MODE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidUpdateMode(raw))?,
            None => TaskUpdateMode::default(),
        };

        let database_url = var("DATABASE_URL").unwrap_or_else(|| {
            compose_database_url(
                var("DB_USER").as_deref(),
                var("DB_PASS").as_deref(),
                var("DB_HOST").as_deref().unwrap_or(DEFAULT_DB_HOST),
                var("DB_NAME").as_deref().unwrap_or(DEFAULT_DB_NAME),
            )
        });

        let cors_allowed_origins = match var("CORS_ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw),
            None => DEFAULT_CORS_ORIGINS.iter().map(ToString::to_string).collect(),
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url,
            jwt_secret: var("JWT_SECRET"),
            cors_allowed_origins,
            task_update_mode,
        })
    }
}

// 署名鍵と接続 URL（パスワードを含みうる）はログに出さない
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &"***")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "***"))
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("task_update_mode", &self.task_update_mode)
            .finish()
    }
}

fn compose_database_url(user: Option<&str>, pass: Option<&str>, host: &str, name: &str) -> String {
    let credentials = match (user, pass) {
        (Some(user), Some(pass)) => format!("{user}:{pass}@"),
        (Some(user), None) => format!("{user}@"),
        _ => String::new(),
    };
    format!("postgres://{credentials}{host}/{name}")
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
