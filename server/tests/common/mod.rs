#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use provider::{models::Entree, MenuProvider, ProviderError};
use serde_json::Value;
use server::{
    auth::{DbUserResolver, Principal},
    config::Config,
    database,
    models::User,
    routes,
    state::AppState,
    testing::{test_pool, StubUserResolver},
};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Menu provider double serving a canned list of entrees.
pub struct FakeMenu {
    pub entrees: Vec<Entree>,
    pub fail: bool,
}

#[async_trait]
impl MenuProvider for FakeMenu {
    async fn entrees(
        &self,
        _date_time: &str,
        _dining_commons_code: &str,
        _meal_code: &str,
    ) -> Result<Vec<Entree>, ProviderError> {
        if self.fail {
            return Err(ProviderError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }

        Ok(self.entrees.clone())
    }
}

pub fn entree(name: &str, station: &str) -> Entree {
    Entree {
        name: name.to_string(),
        station: station.to_string(),
    }
}

pub fn test_config() -> Config {
    Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        menu_api_url: "http://menu.invalid".to_string(),
        menu_api_key: "test-key".to_string(),
    }
}

/// App with the identity stub and a canned menu.
pub async fn app_with_menu(entrees: Vec<Entree>) -> (Router, SqlitePool) {
    let pool = test_pool().await;
    let state = Arc::new(AppState {
        config: test_config(),
        pool: pool.clone(),
        provider: Arc::new(FakeMenu {
            entrees,
            fail: false,
        }),
        user_resolver: Arc::new(StubUserResolver),
    });

    (routes::app(state), pool)
}

pub async fn app_with_failing_menu() -> Router {
    let pool = test_pool().await;
    let state = Arc::new(AppState {
        config: test_config(),
        pool,
        provider: Arc::new(FakeMenu {
            entrees: Vec::new(),
            fail: true,
        }),
        user_resolver: Arc::new(StubUserResolver),
    });

    routes::app(state)
}

/// App with the production resolver, for flows that need users in the
/// database (federated identity, alias moderation).
pub async fn app_with_db_users() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    let state = Arc::new(AppState {
        config: test_config(),
        pool: pool.clone(),
        provider: Arc::new(FakeMenu {
            entrees: Vec::new(),
            fail: false,
        }),
        user_resolver: Arc::new(DbUserResolver::new(pool.clone())),
    });

    (routes::app(state), pool)
}

pub async fn seed_user(
    pool: &SqlitePool,
    google_sub: &str,
    admin: bool,
    moderator: bool,
) -> User {
    let user = User {
        id: 0,
        google_sub: google_sub.to_string(),
        email: format!("{google_sub}@ucsb.edu"),
        full_name: format!("Seed {google_sub}"),
        given_name: "Seed".to_string(),
        family_name: google_sub.to_string(),
        picture_url: format!("https://example.org/{google_sub}.jpg"),
        email_verified: true,
        locale: String::new(),
        hosted_domain: "ucsb.edu".to_string(),
        admin,
        moderator,
        alias: None,
        proposed_alias: None,
        date_approved: None,
    };

    database::insert_user(pool, &user).await.unwrap()
}

pub fn federated(subject: &str) -> Principal {
    Principal::Federated {
        subject: subject.to_string(),
    }
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn request_as(method: Method, uri: &str, principal: Principal) -> Request<Body> {
    let mut req = request(method, uri);
    req.extensions_mut().insert(principal);
    req
}

pub fn post_json_as(uri: &str, principal: Principal, body: Value) -> Request<Body> {
    let mut req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    req.extensions_mut().insert(principal);
    req
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, req).await;
    let value = serde_json::from_str(&body).unwrap_or(Value::Null);

    (status, value)
}
