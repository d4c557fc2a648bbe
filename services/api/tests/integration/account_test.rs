use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{Value, json};

use cookbook_api::infra::db::{DbRevokedTokenRepository, DbUserRepository};
use cookbook_api::jobs::signup::WELCOME_SUBJECT;
use cookbook_api::usecase::account::RefreshTokenUseCase;
use cookbook_auth_types::identity::JwtSecret;
use cookbook_auth_types::token::{TokenKind, issue_token};
use cookbook_testing::auth::TEST_JWT_SECRET;

use crate::helpers::{TestApp, seed_user, spawn_app, test_db};

async fn register(app: &TestApp, username: &str, password: &str) -> Value {
    let response = app
        .server
        .post("/users/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": password,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

fn bearer_of(session: &Value) -> (HeaderName, HeaderValue) {
    let token = session["tokens"]["access"].as_str().unwrap();
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

#[tokio::test]
async fn should_register_with_tokens_and_send_welcome_email() {
    let app = spawn_app().await;
    let body = register(&app, "pradyneel", "securepassword").await;

    assert_eq!(body["user"]["username"], "pradyneel");
    assert!(body["tokens"]["access"].is_string());
    assert!(body["tokens"]["refresh"].is_string());

    let sent = app.mailer.wait_for(1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "pradyneel@example.com");
    assert_eq!(sent[0].subject, WELCOME_SUBJECT);
}

#[tokio::test]
async fn should_reject_invalid_registration_payload() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/users/register")
        .json(&json!({
            "username": "pradyneel",
            "email": "invalidemail",
            "password": "short",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn should_reject_duplicate_registration() {
    let app = spawn_app().await;
    register(&app, "chef", "securepassword").await;

    let response = app
        .server
        .post("/users/register")
        .json(&json!({
            "username": "chef",
            "email": "chef@example.com",
            "password": "securepassword",
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["kind"], "USER_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_login_and_reject_bad_password() {
    let app = spawn_app().await;
    register(&app, "chef", "securepassword").await;

    app.server
        .post("/users/login")
        .json(&json!({ "email": "chef@example.com", "password": "securepassword" }))
        .await
        .assert_status_ok();

    let bad = app
        .server
        .post("/users/login")
        .json(&json!({ "email": "chef@example.com", "password": "wrongpassword" }))
        .await;
    bad.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(bad.json::<Value>()["kind"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn should_logout_and_block_refresh() {
    let app = spawn_app().await;
    let session = register(&app, "chef", "securepassword").await;
    let auth = bearer_of(&session);
    let refresh = session["tokens"]["refresh"].as_str().unwrap().to_owned();

    app.server
        .post("/users/logout")
        .json(&json!({ "refresh": refresh }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .post("/users/logout")
        .add_header(auth.0.clone(), auth.1.clone())
        .json(&json!({ "refresh": refresh }))
        .await
        .assert_status(StatusCode::RESET_CONTENT);

    let response = app
        .server
        .post("/users/token/refresh")
        .json(&json!({ "refresh": refresh }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_rotate_refresh_token() {
    let app = spawn_app().await;
    let session = register(&app, "chef", "securepassword").await;
    let refresh = session["tokens"]["refresh"].as_str().unwrap().to_owned();

    let rotated: Value = app
        .server
        .post("/users/token/refresh")
        .json(&json!({ "refresh": refresh }))
        .await
        .json();
    assert!(rotated["access"].is_string());
    assert_ne!(rotated["refresh"], refresh.as_str());

    app.server
        .post("/users/token/refresh")
        .json(&json!({ "refresh": refresh }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_rotate_each_refresh_token_only_once_under_concurrency() {
    let db = test_db().await;
    let user = seed_user(&db, "chef").await;
    let refresh = issue_token(user.id, TokenKind::Refresh, TEST_JWT_SECRET).unwrap();
    let rotate = || RefreshTokenUseCase {
        users: DbUserRepository { db: db.clone() },
        revoked: DbRevokedTokenRepository { db: db.clone() },
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
    };
    let (a, b) = (rotate(), rotate());

    let (first, second) = tokio::join!(a.execute(&refresh.token), b.execute(&refresh.token));
    let winners = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "first={:?} second={:?}", first.is_ok(), second.is_ok());
}

#[tokio::test]
async fn should_update_and_read_profile() {
    let app = spawn_app().await;
    let session = register(&app, "chef", "securepassword").await;
    let auth = bearer_of(&session);

    app.server.get("/users/profile").await.assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .patch("/users/profile")
        .add_header(auth.0.clone(), auth.1.clone())
        .json(&json!({ "bio": "I bake bread." }))
        .await
        .assert_status_ok();

    let profile: Value = app
        .server
        .get("/users/profile")
        .add_header(auth.0.clone(), auth.1.clone())
        .await
        .json();
    assert_eq!(profile["username"], "chef");
    assert_eq!(profile["bio"], "I bake bread.");
}

#[tokio::test]
async fn should_change_password_and_login_with_new_one() {
    let app = spawn_app().await;
    let session = register(&app, "chef", "securepassword").await;
    let auth = bearer_of(&session);

    app.server
        .patch("/users/password")
        .add_header(auth.0.clone(), auth.1.clone())
        .json(&json!({ "old_password": "wrongpassword", "new_password": "newsecurepass" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .patch("/users/password")
        .add_header(auth.0.clone(), auth.1.clone())
        .json(&json!({ "old_password": "securepassword", "new_password": "newsecurepass" }))
        .await
        .assert_status_ok();

    app.server
        .post("/users/login")
        .json(&json!({ "email": "chef@example.com", "password": "newsecurepass" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn should_answer_health_checks() {
    let app = spawn_app().await;
    app.server.get("/healthz").await.assert_status_ok();
    app.server.get("/readyz").await.assert_status_ok();
}
