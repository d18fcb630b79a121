mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use classtrack::modules::users::model::Role;
use common::{
    TEST_PASSWORD, body_json, deactivate_user, generate_unique_email, get, seed_user, test_app,
    test_state, token_for,
};
use serde_json::json;
use tower::ServiceExt;

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_login_returns_token_and_session_cookie() {
    let state = test_state();
    let email = generate_unique_email();
    let user = seed_user(&state, &email, Role::Student).await;

    let response = test_app(&state)
        .oneshot(login_request(&email, TEST_PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set a session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let state = test_state();
    let email = generate_unique_email();
    seed_user(&state, &email, Role::Student).await;

    let response = test_app(&state)
        .oneshot(login_request(&email, "not-the-password"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_rejects_unknown_email_with_same_message() {
    let state = test_state();

    let response = test_app(&state)
        .oneshot(login_request("nobody@test.com", TEST_PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Same message as a wrong password so the response does not leak
    // which emails exist.
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_rejects_inactive_account() {
    let state = test_state();
    let email = generate_unique_email();
    let user = seed_user(&state, &email, Role::Teacher).await;
    deactivate_user(&state, user.id).await;

    let response = test_app(&state)
        .oneshot(login_request(&email, TEST_PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let state = test_state();
    let email = generate_unique_email();
    let user = seed_user(&state, &email, Role::Teacher).await;
    let token = token_for(&state, &user);

    let response = test_app(&state)
        .oneshot(get("/api/auth/me", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["role"], "teacher");
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let state = test_state();

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .body(Body::empty())
        .unwrap();
    let response = test_app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_garbled_token_is_unauthorized() {
    let state = test_state();

    let response = test_app(&state)
        .oneshot(get("/api/auth/me", "not-a-jwt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_accepted_from_cookie() {
    let state = test_state();
    let email = generate_unique_email();
    let user = seed_user(&state, &email, Role::Student).await;
    let token = token_for(&state, &user);

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("token={}", token))
        .body(Body::empty())
        .unwrap();
    let response = test_app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let state = test_state();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    let response = test_app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout must clear the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("token="));

    let body = body_json(response).await;
    assert_eq!(body["message"], "Logged out successfully");
}
