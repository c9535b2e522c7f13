mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use campusdesk::router::init_router;
use campusdesk::utils::email::{Mailer, OutgoingEmail};
use campusdesk_core::{AppError, Role, verify_password};
use campusdesk_db::CredentialStore;
use common::{
    FailingMailer, body_json, create_test_user, json_request, login_cookie, test_state,
    test_state_with_mailer,
};
use serde_json::json;
use tower::ServiceExt;

fn token_from_link(text: &str) -> String {
    text.split("reset-password?token=")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_forgot_password_emails_a_reset_link() {
    let (state, mailer) = test_state();
    let user = create_test_user(&state, Role::Parent).await;
    let app = init_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/forgot-password",
            json!({ "email": user.email }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let sent = mailer.wait_for(1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, user.email);
    assert!(
        sent[0]
            .text_body
            .contains("http://frontend.test/reset-password?token=")
    );
    // reset_token_ttl in the test config is 600 seconds.
    assert!(sent[0].text_body.contains("expire in 10 minutes"));
}

#[tokio::test]
async fn test_forgot_password_does_not_reveal_unknown_email() {
    let (state, mailer) = test_state();
    let user = create_test_user(&state, Role::Parent).await;
    let app = init_router(state);

    let known = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/forgot-password",
            json!({ "email": user.email }),
        ))
        .await
        .unwrap();
    let unknown = app
        .oneshot(json_request(
            "POST",
            "/api/auth/forgot-password",
            json!({ "email": "nobody@school.test" }),
        ))
        .await
        .unwrap();

    assert_eq!(known.status(), unknown.status());
    assert_eq!(body_json(known).await, body_json(unknown).await);
    assert_eq!(mailer.wait_for(2).await.len(), 1);
}

#[tokio::test]
async fn test_forgot_password_swallows_delivery_failure() {
    let state = test_state_with_mailer(Arc::new(FailingMailer));
    let user = create_test_user(&state, Role::Teacher).await;
    let app = init_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/forgot-password",
            json!({ "email": user.email }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// Takes far longer than any response should.
struct StalledMailer;

#[async_trait]
impl Mailer for StalledMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<(), AppError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
}

#[tokio::test]
async fn test_forgot_password_does_not_wait_for_delivery() {
    let state = test_state_with_mailer(Arc::new(StalledMailer));
    let user = create_test_user(&state, Role::Teacher).await;
    let app = init_router(state);

    let response = tokio::time::timeout(
        Duration::from_secs(5),
        app.oneshot(json_request(
            "POST",
            "/api/auth/forgot-password",
            json!({ "email": user.email }),
        )),
    )
    .await
    .expect("forgot-password waited on the mailer")
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reset_password_flow() {
    let (state, mailer) = test_state();
    let user = create_test_user(&state, Role::Student).await;
    let users = state.users.clone();
    let app = init_router(state);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/forgot-password",
            json!({ "email": user.email }),
        ))
        .await
        .unwrap();
    let token = token_from_link(&mailer.wait_for(1).await[0].text_body);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/reset-password",
            json!({ "token": token, "new_password": "a-brand-new-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(verify_password("a-brand-new-secret", &stored.password_hash).unwrap());

    // Confirmation follows the reset email.
    let sent = mailer.wait_for(2).await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].subject, "Password Reset Successful");
}

#[tokio::test]
async fn test_reset_token_works_only_once() {
    let (state, mailer) = test_state();
    let user = create_test_user(&state, Role::Parent).await;
    let users = state.users.clone();
    let app = init_router(state);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/forgot-password",
            json!({ "email": user.email }),
        ))
        .await
        .unwrap();
    let token = token_from_link(&mailer.wait_for(1).await[0].text_body);

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/reset-password",
            json!({ "token": token, "new_password": "owner-chosen-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let replay = app
        .oneshot(json_request(
            "POST",
            "/api/auth/reset-password",
            json!({ "token": token, "new_password": "someone-elses-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(replay.status(), StatusCode::BAD_REQUEST);
    let body = body_json(replay).await;
    assert_eq!(body["error"], "Invalid or expired reset token");

    let stored = users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(verify_password("owner-chosen-secret", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn test_older_reset_link_dies_with_the_password() {
    let (state, mailer) = test_state();
    let user = create_test_user(&state, Role::Teacher).await;
    let app = init_router(state);

    for _ in 0..2 {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/forgot-password",
                json!({ "email": user.email }),
            ))
            .await
            .unwrap();
    }
    let sent = mailer.wait_for(2).await;
    let first = token_from_link(&sent[0].text_body);
    let second = token_from_link(&sent[1].text_body);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/reset-password",
            json!({ "token": second, "new_password": "fresh-secret-one" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/reset-password",
            json!({ "token": first, "new_password": "fresh-secret-two" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_password_rejects_bad_token() {
    let (state, _) = test_state();
    let app = init_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/reset-password",
            json!({ "token": "garbage", "new_password": "long-enough-pw" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid or expired reset token");
}

#[tokio::test]
async fn test_session_token_is_not_a_reset_token() {
    let (state, _) = test_state();
    let user = create_test_user(&state, Role::Teacher).await;
    let app = init_router(state);
    let cookie = login_cookie(&app, &user.email).await;
    let session_token = cookie.trim_start_matches("token=").to_string();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/reset-password",
            json!({ "token": session_token, "new_password": "long-enough-pw" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_password_requires_eight_characters() {
    let (state, _) = test_state();
    let app = init_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/reset-password",
            json!({ "token": "whatever", "new_password": "short" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Password must be at least 8 characters");
}
