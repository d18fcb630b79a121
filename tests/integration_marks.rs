mod common;

use axum::http::StatusCode;
use classtrack::modules::users::model::Role;
use common::{
    body_json, generate_unique_email, get, seed_course, seed_student, seed_teacher, seed_user,
    send_json, test_app, test_state, token_for,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_teacher_enters_mark_for_own_course() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-001").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-001", "10-A").await;

    let token = token_for(&state, &teacher_user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/marks",
            &token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "exam_type": "midterm",
                "marks_obtained": 42,
                "total_marks": 50,
                "exam_date": "2026-03-10"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["marks_obtained"], 42);
    assert_eq!(body["entered_by"], teacher.id.to_string());
}

#[tokio::test]
async fn test_mark_cannot_exceed_total() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-002").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-002", "10-A").await;

    let token = token_for(&state, &teacher_user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/marks",
            &token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "exam_type": "midterm",
                "marks_obtained": 60,
                "total_marks": 50,
                "exam_date": "2026-03-10"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "marks_obtained cannot exceed total_marks");
}

#[tokio::test]
async fn test_zero_total_marks_rejected() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-003").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-003", "10-A").await;

    let token = token_for(&state, &teacher_user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/marks",
            &token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "exam_type": "midterm",
                "marks_obtained": 0,
                "total_marks": 0,
                "exam_date": "2026-03-10"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_other_teacher_cannot_enter_marks() {
    let state = test_state();
    let owner_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let owner = seed_teacher(&state, owner_user.id, "T-004").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(owner.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-004", "10-A").await;

    let other_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    seed_teacher(&state, other_user.id, "T-005").await;

    let token = token_for(&state, &other_user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/marks",
            &token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "exam_type": "midterm",
                "marks_obtained": 42,
                "total_marks": 50,
                "exam_date": "2026-03-10"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_student_sees_own_marks_with_percentage() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-006").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-005", "10-A").await;

    let teacher_token = token_for(&state, &teacher_user);
    let app = test_app(&state);
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/marks",
            &teacher_token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "exam_type": "quiz",
                "marks_obtained": 8,
                "total_marks": 10,
                "exam_date": "2026-03-10"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let student_token = token_for(&state, &student_user);
    let response = app.oneshot(get("/api/marks", &student_token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["percentage"], 80.0);
    assert_eq!(rows[0]["course_code"], "MATH101");
    // The student view never exposes who entered the mark.
    assert!(rows[0].get("entered_by").is_none());
}

#[tokio::test]
async fn test_student_cannot_see_classmates_marks() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-007").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;

    let a_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    seed_student(&state, a_user.id, "S-010", "10-A").await;
    let b_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let b = seed_student(&state, b_user.id, "S-011", "10-A").await;

    let teacher_token = token_for(&state, &teacher_user);
    let app = test_app(&state);
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/marks",
            &teacher_token,
            json!({
                "student_id": b.id,
                "course_id": course.id,
                "exam_type": "quiz",
                "marks_obtained": 9,
                "total_marks": 10,
                "exam_date": "2026-03-10"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Student A's listing stays empty even with a course filter.
    let a_token = token_for(&state, &a_user);
    let response = app
        .oneshot(get(&format!("/api/marks?course_id={}", course.id), &a_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_teacher_listing_requires_course_filter() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    seed_teacher(&state, teacher_user.id, "T-008").await;

    let token = token_for(&state, &teacher_user);
    let response = test_app(&state)
        .oneshot(get("/api/marks", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_listing_is_school_wide_report() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-009").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-020", "10-A").await;

    let teacher_token = token_for(&state, &teacher_user);
    let app = test_app(&state);
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/marks",
            &teacher_token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "exam_type": "final",
                "marks_obtained": 70,
                "total_marks": 100,
                "exam_date": "2026-03-10"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let admin_token = token_for(&state, &admin);
    let response = app.oneshot(get("/api/marks", &admin_token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["roll_number"], "S-020");
    assert_eq!(rows[0]["course_code"], "MATH101");
}
