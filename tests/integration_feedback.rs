mod common;

use axum::http::StatusCode;
use classtrack::modules::users::model::Role;
use common::{
    body_json, generate_unique_email, get, seed_course, seed_student, seed_user, send_json,
    test_app, test_state, token_for,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_student_submits_feedback() {
    let state = test_state();
    let user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, user.id, "S-001", "10-A").await;
    let course = seed_course(&state, "MATH101", "10-A", None).await;

    let token = token_for(&state, &user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/feedback",
            &token,
            json!({
                "course_id": course.id,
                "category": "teaching",
                "message": "More worked examples please",
                "rating": 4
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    // Attributed to the principal's own profile.
    assert_eq!(body["student_id"], student.id.to_string());
    assert_eq!(body["rating"], 4);
    assert_eq!(body["status"], "open");
}

#[tokio::test]
async fn test_feedback_without_course_is_allowed() {
    let state = test_state();
    let user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    seed_student(&state, user.id, "S-002", "10-A").await;

    let token = token_for(&state, &user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/feedback",
            &token,
            json!({
                "category": "facilities",
                "message": "The library needs more seats",
                "rating": 3
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert!(body["course_id"].is_null());
}

#[tokio::test]
async fn test_feedback_rejects_unknown_course() {
    let state = test_state();
    let user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    seed_student(&state, user.id, "S-003", "10-A").await;

    let token = token_for(&state, &user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/feedback",
            &token,
            json!({
                "course_id": uuid::Uuid::new_v4(),
                "category": "teaching",
                "message": "Ghost course",
                "rating": 2
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_feedback_rating_bounds_enforced() {
    let state = test_state();
    let user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    seed_student(&state, user.id, "S-004", "10-A").await;

    let token = token_for(&state, &user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/feedback",
            &token,
            json!({
                "category": "teaching",
                "message": "Off the scale",
                "rating": 6
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_teacher_cannot_submit_feedback() {
    let state = test_state();
    let teacher = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let token = token_for(&state, &teacher);

    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/feedback",
            &token,
            json!({
                "category": "teaching",
                "message": "Not a student",
                "rating": 1
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_only_admins_read_feedback() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    seed_student(&state, user.id, "S-005", "10-A").await;

    let student_token = token_for(&state, &user);
    let app = test_app(&state);
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/feedback",
            &student_token,
            json!({
                "category": "teaching",
                "message": "Anonymous to staff, not to admins",
                "rating": 5
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The submitting student cannot read the collected feedback back.
    let response = app
        .clone()
        .oneshot(get("/api/feedback", &student_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token = token_for(&state, &admin);
    let response = app.oneshot(get("/api/feedback", &admin_token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["roll_number"], "S-005");
}
