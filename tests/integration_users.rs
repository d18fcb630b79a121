mod common;

use axum::http::StatusCode;
use classtrack::modules::users::model::Role;
use common::{
    body_json, generate_unique_email, get, seed_user, send_json, test_app, test_state, token_for,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_admin_creates_user() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let token = token_for(&state, &admin);

    let email = generate_unique_email();
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/users",
            &token,
            json!({
                "email": email,
                "password": "password123",
                "role": "student",
                "full_name": "New Student"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "student");
    assert_eq!(body["status"], "active");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let token = token_for(&state, &admin);

    let email = generate_unique_email();
    seed_user(&state, &email, Role::Student).await;

    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/users",
            &token,
            json!({
                "email": email,
                "password": "password123",
                "role": "student",
                "full_name": "Duplicate"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn test_short_password_rejected() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let token = token_for(&state, &admin);

    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/users",
            &token,
            json!({
                "email": generate_unique_email(),
                "password": "short",
                "role": "student",
                "full_name": "Short Password"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_admin_cannot_manage_users() {
    let state = test_state();
    let teacher = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let student = seed_user(&state, &generate_unique_email(), Role::Student).await;

    for user in [&teacher, &student] {
        let token = token_for(&state, user);
        let response = test_app(&state)
            .oneshot(get("/api/users", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Access denied for this role");
    }
}

#[tokio::test]
async fn test_list_users_paginates() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let token = token_for(&state, &admin);

    for _ in 0..4 {
        seed_user(&state, &generate_unique_email(), Role::Student).await;
    }

    let response = test_app(&state)
        .oneshot(get("/api/users?limit=2&offset=0", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    // 4 students plus the admin itself
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["has_more"], true);
}

#[tokio::test]
async fn test_admin_updates_user() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let token = token_for(&state, &admin);
    let target = seed_user(&state, &generate_unique_email(), Role::Student).await;

    let response = test_app(&state)
        .oneshot(send_json(
            "PUT",
            &format!("/api/users/{}", target.id),
            &token,
            json!({
                "full_name": "Renamed Student",
                "status": "inactive"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["full_name"], "Renamed Student");
    assert_eq!(body["status"], "inactive");
}

#[tokio::test]
async fn test_update_unknown_user_is_not_found() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let token = token_for(&state, &admin);

    let response = test_app(&state)
        .oneshot(send_json(
            "PUT",
            &format!("/api/users/{}", uuid::Uuid::new_v4()),
            &token,
            json!({ "full_name": "Ghost" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_deletes_user() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let token = token_for(&state, &admin);
    let target = seed_user(&state, &generate_unique_email(), Role::Student).await;

    let app = test_app(&state);
    let response = app
        .clone()
        .oneshot(send_json(
            "DELETE",
            &format!("/api/users/{}", target.id),
            &token,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting again reports not found.
    let response = app
        .oneshot(send_json(
            "DELETE",
            &format!("/api/users/{}", target.id),
            &token,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
