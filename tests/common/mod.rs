#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, header};
use campusdesk::state::AppState;
use campusdesk::utils::email::{EmailService, Mailer, OutgoingEmail};
use campusdesk_config::{CookieConfig, CorsConfig, EmailConfig, JwtConfig};
use campusdesk_core::{AppError, Role, hash_password};
use campusdesk_db::{CredentialStore, InMemoryCredentialStore};
use campusdesk_models::{NewUser, UserRecord};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use serde_json::Value;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "correct-horse-battery";

/// Captures outgoing emails instead of sending them.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        self.sent.lock().push(email);
        Ok(())
    }
}

impl RecordingMailer {
    /// Waits for background deliveries until `count` emails have been sent.
    pub async fn wait_for(&self, count: usize) -> Vec<OutgoingEmail> {
        for _ in 0..200 {
            if self.sent.lock().len() >= count {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        self.sent.lock().clone()
    }
}

/// Always fails, like an unreachable SMTP relay.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<(), AppError> {
        Err(AppError::internal_error("SMTP relay unreachable".to_string()))
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_ttl: 3600,
        reset_token_ttl: 600,
    }
}

pub fn cookie_config() -> CookieConfig {
    CookieConfig {
        name: "token".to_string(),
        expires_in_days: 1,
        secure: false,
    }
}

pub fn email_config() -> EmailConfig {
    EmailConfig {
        enabled: false,
        smtp_host: "localhost".to_string(),
        smtp_port: 1025,
        smtp_username: String::new(),
        smtp_password: String::new(),
        from_email: "noreply@campusdesk.test".to_string(),
        from_name: "CampusDesk".to_string(),
        frontend_url: "http://frontend.test".to_string(),
    }
}

pub fn test_state_with_mailer(mailer: Arc<dyn Mailer>) -> AppState {
    let email_config = email_config();
    AppState {
        users: Arc::new(InMemoryCredentialStore::new()),
        email: EmailService::new(mailer, &email_config),
        jwt_config: jwt_config(),
        cookie_config: cookie_config(),
        email_config,
        cors_config: CorsConfig {
            allowed_origins: vec!["http://frontend.test".to_string()],
        },
    }
}

pub fn test_state() -> (AppState, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    (test_state_with_mailer(mailer.clone()), mailer)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@school.test", Uuid::new_v4())
}

pub async fn create_test_user(state: &AppState, role: Role) -> UserRecord {
    state
        .users
        .insert(NewUser {
            name: format!("Test {}", role.label()),
            email: generate_unique_email(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role,
        })
        .await
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// `name=value` of the first Set-Cookie for the session cookie.
pub fn session_set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("token="))
        .map(str::to_string)
}

pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Logs in through the router and returns the `token=...` cookie pair.
pub async fn login_cookie(app: &axum::Router, email: &str) -> String {
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "email": email, "password": PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    cookie_pair(&session_set_cookie(&response).expect("login sets the session cookie"))
}
