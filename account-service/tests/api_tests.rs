mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

use account_service::domain::user::models::LoginIdentifier;

fn register_body(username: &str, email: &str, password: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": password,
        "confirmPassword": password,
    })
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&register_body("alice", "a@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@x.com");
    assert!(body["id"].is_string());

    // Registration does not log the caller in.
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_register_normalizes_email_case() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&register_body("alice", "Alice@Example.COM", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("expected errors array");
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["username", "email", "password", "confirmPassword"]
    );
}

#[tokio::test]
async fn test_register_short_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&register_body("al", "a@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("expected errors array");
    assert_eq!(errors[0]["field"], "username");
    assert!(errors[0]["message"]
        .as_str()
        .unwrap()
        .contains("minimum 3 characters"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&register_body("alice", "not-an-email", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("expected errors array");
    assert_eq!(errors[0]["field"], "email");
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&register_body("alice", "a@x.com", "short7!"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("expected errors array");
    assert_eq!(errors[0]["field"], "password");
    assert!(errors[0]["message"]
        .as_str()
        .unwrap()
        .contains("minimum 8 characters"));
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "username": "alice",
            "email": "a@x.com",
            "password": "longpass1",
            "confirmPassword": "longpass2",
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("expected errors array");
    assert_eq!(errors[0]["field"], "confirmPassword");
    assert_eq!(errors[0]["message"], "Passwords do not match");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&register_body("alice", "a@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/register")
        .json(&register_body("alice", "other@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["message"], "User already exists");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&register_body("alice", "a@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/register")
        .json(&register_body("bob", "a@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["message"], "User already exists");
}

#[tokio::test]
async fn test_register_concurrent_duplicate_yields_one_success() {
    let app = TestApp::spawn().await;

    // Same username, different emails, submitted concurrently. Both can
    // pass the workflow pre-check; the store must arbitrate.
    let first = app
        .post("/register")
        .json(&register_body("alice", "a@x.com", "longpass1"))
        .send();
    let second = app
        .post("/register")
        .json(&register_body("alice", "b@x.com", "longpass1"))
        .send();

    let (first, second) = tokio::join!(first, second);
    let statuses = [
        first.expect("Failed to execute request").status(),
        second.expect("Failed to execute request").status(),
    ];

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let rejected = statuses
        .iter()
        .filter(|s| **s == StatusCode::BAD_REQUEST)
        .count();
    assert_eq!(created, 1, "exactly one registration must win");
    assert_eq!(rejected, 1, "the other must fail as a duplicate");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&register_body("alice", "a@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/login")
        .json(&json!({ "username": "alice", "password": "longpass1" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("expected token string");
    assert!(!token.is_empty());

    let claims = app
        .authenticator
        .verify_token(token)
        .expect("issued token must verify");
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("expected errors array");
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["username", "password"]);
}

#[tokio::test]
async fn test_login_enumeration_resistance() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&register_body("alice", "a@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    // Wrong password for an existing account.
    let wrong_password = app
        .post("/login")
        .json(&json!({ "username": "alice", "password": "wrongpass1" }))
        .send()
        .await
        .expect("Failed to execute request");
    let wrong_password_status = wrong_password.status();
    let wrong_password_body = wrong_password.bytes().await.expect("Failed to read body");

    // Nonexistent account.
    let unknown_user = app
        .post("/login")
        .json(&json!({ "username": "ghost", "password": "longpass1" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_user_status = unknown_user.status();
    let unknown_user_body = unknown_user.bytes().await.expect("Failed to read body");

    assert_eq!(wrong_password_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password_status, unknown_user_status);
    // Bit-identical bodies: the response must not reveal which check failed.
    assert_eq!(wrong_password_body, unknown_user_body);
}

#[tokio::test]
async fn test_login_by_email_when_configured() {
    let app = TestApp::spawn_with(LoginIdentifier::Email).await;

    app.post("/register")
        .json(&register_body("alice", "a@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/login")
        .json(&json!({ "email": "A@X.com", "password": "longpass1" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_protected_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/protected")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["message"], "Access token required");
}

#[tokio::test]
async fn test_protected_with_malformed_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/protected", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_protected_with_expired_token() {
    let app = TestApp::spawn().await;

    let created: Value = app
        .post("/register")
        .json(&register_body("alice", "a@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    let token = app.issue_expired_token(created["id"].as_str().unwrap(), "alice");

    let response = app
        .get_authenticated("/protected", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_protected_with_token_for_unknown_subject() {
    let app = TestApp::spawn().await;

    // Signed correctly, but the subject was never registered.
    let token = app
        .authenticator
        .issue_token("5cce6e50-7b1a-4cf7-9aa9-06a57d601f53", "ghost")
        .expect("Failed to issue token");

    let response = app
        .get_authenticated("/protected", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unmatched_route_falls_back_to_404() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/does-not-exist")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["message"], "Route not found");
}

#[tokio::test]
async fn test_register_login_protected_flow() {
    let app = TestApp::spawn().await;

    // Register
    let created = app
        .post("/register")
        .json(&register_body("alice", "a@x.com", "longpass1"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.expect("Failed to parse response");

    // Login
    let login = app
        .post("/login")
        .json(&json!({ "username": "alice", "password": "longpass1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(login.status(), StatusCode::OK);
    let login: Value = login.json().await.expect("Failed to parse response");
    let token = login["token"].as_str().expect("expected token string");
    assert!(!token.is_empty());

    // Protected route with the fresh token
    let protected = app
        .get_authenticated("/protected", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(protected.status(), StatusCode::OK);

    let body: Value = protected.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "This is a protected route");
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["id"], created["id"]);
}
