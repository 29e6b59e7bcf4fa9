// tests/support/helpers.rs
use std::{sync::Arc, time::Duration};

use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use stockify::application::{
    commands::{
        articles::CreateArticleCommand, requests::CreateRequestCommand, retry::RetryPolicy,
    },
    dto::{ArticleDto, AuthenticatedUser, StockRequestDto},
    services::{ApplicationServices, Repositories, ServiceSettings},
};
use stockify::domain::user::{DisplayName, Email, NewUser, PasswordHash, Role, UserId, UserRepository};
use stockify::infrastructure::memory::InMemoryStore;
use stockify::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};

use super::mocks::{
    ADMIN_ID, DummyPasswordHasher, DummyTokenManager, FixedClock, USER_ID, admin_actor, fixed_now,
};

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub services: Arc<ApplicationServices>,
}

impl TestApp {
    pub fn router(&self) -> axum::Router {
        build_router(
            HttpState::new(Arc::clone(&self.services)),
            RouterOptions::default(),
        )
    }
}

async fn seed_user(store: &InMemoryStore, id: UserId, name: &str, email: &str, role: Role) {
    let user = NewUser {
        id,
        name: DisplayName::new(name).unwrap(),
        email: Email::new(email).unwrap(),
        password_hash: PasswordHash::new("plain:secret-password").unwrap(),
        role,
        created_at: fixed_now(),
    };
    UserRepository::insert(store, user).await.expect("seed user");
}

/// In-memory application with an admin ("Admin") and a regular user ("Jane")
/// already registered under the ids the dummy token manager hands out.
pub async fn test_app() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    seed_user(&store, *ADMIN_ID, "Admin", "admin@example.com", Role::Admin).await;
    seed_user(&store, *USER_ID, "Jane", "jane@example.com", Role::User).await;
    build_app(store)
}

/// Same as [`test_app`] but without any registered account.
pub fn empty_app() -> TestApp {
    build_app(Arc::new(InMemoryStore::new()))
}

fn build_app(store: Arc<InMemoryStore>) -> TestApp {
    let repositories = Arc::clone(&store).repositories();
    app_with_repositories(store, repositories)
}

/// Seeded application whose storage ports can be swapped before wiring, for
/// tests that wrap one of them.
pub async fn test_app_with(
    customize: impl FnOnce(&Arc<InMemoryStore>, &mut Repositories),
) -> TestApp {
    let base = test_app().await;
    let mut repositories = Arc::clone(&base.store).repositories();
    customize(&base.store, &mut repositories);
    app_with_repositories(base.store, repositories)
}

fn app_with_repositories(store: Arc<InMemoryStore>, repositories: Repositories) -> TestApp {
    let settings = ServiceSettings {
        ledger_retry: RetryPolicy::default()
            .with_max_attempts(3)
            .with_attempt_timeout(Duration::from_secs(2)),
        expiry_alert_days: 30,
    };
    let services = Arc::new(ApplicationServices::new(
        repositories,
        Arc::new(DummyPasswordHasher),
        Arc::new(DummyTokenManager),
        Arc::new(FixedClock),
        settings,
    ));
    TestApp { store, services }
}

pub async fn create_article(app: &TestApp, name: &str, quantity: i32, min_quantity: i32) -> ArticleDto {
    let command = CreateArticleCommand::builder()
        .name(name)
        .description(format!("{name} for tests"))
        .quantity(quantity)
        .min_quantity(min_quantity)
        .build()
        .unwrap();
    app.services
        .article_commands
        .create_article(&admin_actor(), command)
        .await
        .expect("create article")
}

pub async fn file_request(
    app: &TestApp,
    actor: &AuthenticatedUser,
    article: &ArticleDto,
    quantity: i32,
) -> StockRequestDto {
    app.services
        .request_commands
        .create_request(
            actor,
            CreateRequestCommand {
                article_id: article.id.to_string(),
                quantity,
            },
        )
        .await
        .expect("create request")
}

pub fn bearer_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

/// Assert the `{error, message}` envelope and the status it came with.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "unexpected content-type: {content_type}"
    );
    let (_, json) = read_json(resp).await;
    assert_eq!(json["error"], expected_error, "unexpected body: {json}");
    assert!(
        json["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected a message in {json}"
    );
}
