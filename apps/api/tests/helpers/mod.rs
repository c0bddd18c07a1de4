//! ルーターテスト共通ヘルパー
//!
//! 本番と同じ `build_app` にモックリポジトリを注入し、
//! `tower::ServiceExt::oneshot` でリクエストを送る。

#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use axum::{Router, body::Body};
use http::{Request, Response, StatusCode};
use serde_json::Value;
use taskmgmt_api::{
    app_builder::{AppDependencies, build_app},
    config::AppConfig,
};
use taskmgmt_infra::{
    JwtTokenIssuer,
    mock::{MockReadinessCheck, MockTaskRepository, MockUserRepository},
};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "router-test-secret";
pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

pub struct TestApp {
    pub router:    Router,
    pub users:     MockUserRepository,
    pub tasks:     MockTaskRepository,
    pub readiness: MockReadinessCheck,
}

/// 環境変数を指定してテスト用アプリケーションを構築する
pub fn test_app_with(vars: &[(&str, &str)]) -> TestApp {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();

    let users = MockUserRepository::new();
    let tasks = MockTaskRepository::new();
    let readiness = MockReadinessCheck::new("database", true);

    let router = build_app(
        &config,
        AppDependencies {
            user_repository:  Arc::new(users.clone()),
            task_repository:  Arc::new(tasks.clone()),
            token_issuer:     Arc::new(JwtTokenIssuer::new(config.jwt_secret.clone())),
            readiness_checks: vec![Arc::new(readiness.clone())],
        },
    );

    TestApp {
        router,
        users,
        tasks,
        readiness,
    }
}

/// デフォルト設定（merge モード、署名鍵あり）のテスト用アプリケーション
pub fn test_app() -> TestApp {
    test_app_with(&[("JWT_SECRET", TEST_SECRET)])
}

impl TestApp {
    /// リクエストを送り、レスポンスをそのまま返す
    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// JSON 本文付き（または本文なし）のリクエストを送り、ステータスと JSON 本文を返す
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.request(request).await;
        let status = response.status();
        (status, json_body(response).await)
    }
}

/// レスポンス本文を JSON として読む
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// レスポンス本文を文字列として読む
pub async fn text_body(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
