mod common;

use axum::http::StatusCode;
use campusdesk::router::init_router;
use campusdesk_auth::{SessionClaims, create_reset_token, sign_claims};
use campusdesk_config::JwtConfig;
use campusdesk_core::{Role, capability_strings};
use campusdesk_db::CredentialStore;
use chrono::Utc;
use common::{
    PASSWORD, body_json, create_test_user, get_with_bearer, get_with_cookie, json_request,
    jwt_config, login_cookie, session_set_cookie, test_state,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_login_sets_http_only_cookie_and_returns_profile() {
    let (state, _) = test_state();
    let user = create_test_user(&state, Role::SchoolAdmin).await;
    let app = init_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": user.email, "password": PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = session_set_cookie(&response).unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/"));

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], user.email);
    assert_eq!(body["user"]["role"], "SCHOOL_ADMIN");
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert!(body["user"]["permissions"]
        .as_array()
        .unwrap()
        .contains(&json!("view_reports")));
    assert!(body["expires_at"].is_string());
    // The token travels only in the cookie.
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let (state, _) = test_state();
    let user = create_test_user(&state, Role::Teacher).await;
    let app = init_router(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": user.email.to_uppercase(), "password": PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let (state, _) = test_state();
    let user = create_test_user(&state, Role::Student).await;
    let inactive = create_test_user(&state, Role::Parent).await;
    state.users.set_active(inactive.id, false).await.unwrap();
    let app = init_router(state);

    let attempts = [
        json!({ "email": user.email, "password": "wrong-password" }),
        json!({ "email": "nobody@school.test", "password": PASSWORD }),
        json!({ "email": inactive.email, "password": PASSWORD }),
    ];

    for attempt in attempts {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/login", attempt))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(session_set_cookie(&response).is_none());
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid email or password");
    }
}

#[tokio::test]
async fn test_login_validation() {
    let (state, _) = test_state();
    let app = init_router(state);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "not-an-email", "password": "x" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "a@school.test" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "password is required");
}

#[tokio::test]
async fn test_me_with_session_cookie() {
    let (state, _) = test_state();
    let user = create_test_user(&state, Role::Parent).await;
    let app = init_router(state);
    let cookie = login_cookie(&app, &user.email).await;

    let response = app
        .oneshot(get_with_cookie("/api/auth/me", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["name"], user.name);
    assert_eq!(body["role"], "PARENT");
    assert_eq!(
        body["permissions"],
        json!(capability_strings(Role::Parent))
    );
}

#[tokio::test]
async fn test_me_with_bearer_token() {
    let (state, _) = test_state();
    let user = create_test_user(&state, Role::Teacher).await;
    let app = init_router(state);
    let cookie = login_cookie(&app, &user.email).await;
    let token = cookie.trim_start_matches("token=");

    let response = app
        .oneshot(get_with_bearer("/api/auth/me", token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_does_not_hit_the_store() {
    // A deactivated user keeps a working session until the token expires.
    let (state, _) = test_state();
    let user = create_test_user(&state, Role::Teacher).await;
    let users = state.users.clone();
    let app = init_router(state);
    let cookie = login_cookie(&app, &user.email).await;

    users.set_active(user.id, false).await.unwrap();

    let response = app
        .oneshot(get_with_cookie("/api/auth/me", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

async fn assert_rejected(cookie: Option<&str>) {
    let (state, _) = test_state();
    let app = init_router(state);

    let response = app
        .oneshot(get_with_cookie("/api/auth/me", cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Please log in");
}

#[tokio::test]
async fn test_me_without_token() {
    assert_rejected(None).await;
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    assert_rejected(Some("token=not.a.jwt")).await;
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let now = Utc::now().timestamp() as usize;
    let claims = SessionClaims {
        sub: "6a0e5c52-3f57-4bc0-9d38-0d0cf0a1a111".to_string(),
        email: "late@school.test".to_string(),
        name: "Late".to_string(),
        role: Role::Teacher,
        permissions: capability_strings(Role::Teacher),
        exp: now - 60,
        iat: now - 3660,
    };
    let token = sign_claims(&claims, &jwt_config()).unwrap();

    assert_rejected(Some(&format!("token={}", token))).await;
}

#[tokio::test]
async fn test_me_with_forged_token() {
    let now = Utc::now().timestamp() as usize;
    let claims = SessionClaims {
        sub: "6a0e5c52-3f57-4bc0-9d38-0d0cf0a1a111".to_string(),
        email: "mallory@school.test".to_string(),
        name: "Mallory".to_string(),
        role: Role::SuperAdmin,
        permissions: vec!["*".to_string()],
        exp: now + 3600,
        iat: now,
    };
    let forged = sign_claims(
        &claims,
        &JwtConfig {
            secret: "some-other-secret".to_string(),
            ..jwt_config()
        },
    )
    .unwrap();

    assert_rejected(Some(&format!("token={}", forged))).await;
}

#[tokio::test]
async fn test_reset_token_is_not_a_session() {
    let token = create_reset_token(
        "6a0e5c52-3f57-4bc0-9d38-0d0cf0a1a111",
        "someone@school.test",
        "$2b$12$stored-hash",
        &jwt_config(),
    )
    .unwrap();

    assert_rejected(Some(&format!("token={}", token))).await;
}

#[tokio::test]
async fn test_logout_clears_cookie_and_is_idempotent() {
    let (state, _) = test_state();
    let user = create_test_user(&state, Role::Student).await;
    let app = init_router(state);
    let cookie = login_cookie(&app, &user.email).await;

    for cookie in [Some(cookie.as_str()), None] {
        let mut request = json_request("POST", "/api/auth/logout", json!({}));
        if let Some(cookie) = cookie {
            request
                .headers_mut()
                .insert(axum::http::header::COOKIE, cookie.parse().unwrap());
        }

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = session_set_cookie(&response).unwrap();
        assert!(set_cookie.starts_with("token=;"));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}

#[tokio::test]
async fn test_permission_table_is_public() {
    let (state, _) = test_state();
    let app = init_router(state);

    let response = app
        .oneshot(get_with_cookie("/api/auth/permissions", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["roles"]["SUPER_ADMIN"], json!(["*"]));
    assert_eq!(
        body["roles"]["TEACHER"],
        json!(capability_strings(Role::Teacher))
    );
}
