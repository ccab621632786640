mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{spawn_app, PASSWORD};

#[tokio::test]
async fn login_returns_token_and_user() {
    let app = spawn_app().await;

    let res = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "agent007", "password": PASSWORD })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Login successful");
    assert_eq!(res.body["user"]["role"], "agent");
    assert!(res.body["user"].get("password_hash").is_none());
    assert!(res.body["token"].as_str().unwrap().split('.').count() == 3);
}

#[tokio::test]
async fn login_accepts_email_and_rejects_bad_password() {
    let app = spawn_app().await;

    let by_email = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "control@imf.gov", "password": PASSWORD })),
        )
        .await;
    assert_eq!(by_email.status, StatusCode::OK);
    assert_eq!(by_email.body["user"]["role"], "admin");

    let wrong = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "agent007", "password": "hunter2" })),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let empty = app
        .send("POST", "/api/auth/login", None, Some(json!({})))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_creates_agents_once() {
    let app = spawn_app().await;
    let body = json!({ "username": "ethan", "email": "ethan.hunt@imf.gov", "password": "s3cret" });

    let created = app
        .send("POST", "/api/auth/register", None, Some(body.clone()))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["user"]["role"], "agent");

    let duplicate = app
        .send("POST", "/api/auth/register", None, Some(body))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let token = created.body["token"].as_str().unwrap();
    let gadget = app
        .send(
            "POST",
            "/api/gadgets",
            Some(token),
            Some(json!({ "name": "Mask", "codename": "MASK-1" })),
        )
        .await;
    assert_eq!(gadget.status, StatusCode::CREATED);
}

#[tokio::test]
async fn verify_echoes_claims() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let res = app.send("GET", "/api/auth/verify", Some(&token), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["user"]["username"], "missioncontrol");
    assert_eq!(res.body["user"]["role"], "admin");
    assert!(res.body["user"]["userId"].is_string());

    let missing = app.get("/api/auth/verify").await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["message"], "No token provided");
}

#[tokio::test]
async fn info_endpoints_describe_usage() {
    let app = spawn_app().await;

    let test = app.get("/api/auth/test").await;
    assert_eq!(test.status, StatusCode::OK);

    let login = app.get("/api/auth/login").await;
    assert_eq!(login.body["method"], "POST");
    assert!(login.body["expectedBody"].is_object());

    let register = app.get("/api/auth/register").await;
    assert_eq!(register.body["method"], "POST");
}
