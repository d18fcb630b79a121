mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use classtrack::modules::attendance::model::{AttendanceStatus, AttendanceUpsert};
use classtrack::modules::users::model::Role;
use common::{
    body_json, generate_unique_email, get, seed_course, seed_student, seed_teacher, seed_user,
    send_json, test_app, test_state, token_for,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_teacher_marks_attendance_for_own_course() {
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
            "/api/attendance",
            &token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "date": "2026-03-02",
                "status": "present"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "present");
    // The marker comes from the token, never from the payload.
    assert_eq!(body["marked_by"], teacher.id.to_string());
}

#[tokio::test]
async fn test_other_teacher_cannot_mark_attendance() {
    let state = test_state();
    let owner_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let owner = seed_teacher(&state, owner_user.id, "T-002").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(owner.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-002", "10-A").await;

    let other_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    seed_teacher(&state, other_user.id, "T-003").await;

    let token = token_for(&state, &other_user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/attendance",
            &token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "status": "present"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Course is assigned to another teacher");
}

#[tokio::test]
async fn test_student_outside_section_rejected() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-004").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-003", "11-B").await;

    let token = token_for(&state, &teacher_user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/attendance",
            &token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "status": "present"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remarking_same_day_overwrites() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-005").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-004", "10-A").await;

    let token = token_for(&state, &teacher_user);
    let app = test_app(&state);

    let mark = |status: &str| {
        send_json(
            "POST",
            "/api/attendance",
            &token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "date": "2026-03-02",
                "status": status
            }),
        )
    };

    let first = app.clone().oneshot(mark("absent")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await;

    let second = app.oneshot(mark("late")).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await;

    // Same record corrected in place, not duplicated.
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["status"], "late");

    let rows = state
        .store
        .attendance_for_course(course.id, None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_record_marked_by_another_teacher_conflicts() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-006").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-005", "10-A").await;

    // A record left behind by the course's previous teacher.
    let former_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let former = seed_teacher(&state, former_user.id, "T-007").await;
    let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    state
        .store
        .upsert_attendance(AttendanceUpsert {
            student_id: student.id,
            course_id: course.id,
            date,
            status: AttendanceStatus::Present,
            marked_by: former.id,
            remarks: None,
        })
        .await
        .unwrap();

    let token = token_for(&state, &teacher_user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/attendance",
            &token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "date": "2026-03-02",
                "status": "absent"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // An admin may overwrite it.
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let admin_token = token_for(&state, &admin);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/attendance",
            &admin_token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "date": "2026-03-02",
                "status": "absent"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_student_cannot_mark_attendance() {
    let state = test_state();
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-006", "10-A").await;
    let course = seed_course(&state, "MATH101", "10-A", None).await;

    let token = token_for(&state, &student_user);
    let response = test_app(&state)
        .oneshot(send_json(
            "POST",
            "/api/attendance",
            &token,
            json!({
                "student_id": student.id,
                "course_id": course.id,
                "status": "present"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_student_sees_only_own_attendance() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-008").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;

    let a_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let a = seed_student(&state, a_user.id, "S-010", "10-A").await;
    let b_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let b = seed_student(&state, b_user.id, "S-011", "10-A").await;

    let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    for (student_id, status) in [(a.id, AttendanceStatus::Present), (b.id, AttendanceStatus::Absent)]
    {
        state
            .store
            .upsert_attendance(AttendanceUpsert {
                student_id,
                course_id: course.id,
                date,
                status,
                marked_by: teacher.id,
                remarks: None,
            })
            .await
            .unwrap();
    }

    // Even with an explicit course filter, a student only gets their
    // own rows.
    let token = token_for(&state, &a_user);
    let response = test_app(&state)
        .oneshot(get(
            &format!("/api/attendance?course_id={}", course.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "present");
    assert_eq!(rows[0]["course_code"], "MATH101");
    assert!(rows[0].get("student_id").is_none());
}

#[tokio::test]
async fn test_teacher_listing_requires_course_filter() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    seed_teacher(&state, teacher_user.id, "T-009").await;

    let token = token_for(&state, &teacher_user);
    let response = test_app(&state)
        .oneshot(get("/api/attendance", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "course_id is required");
}

#[tokio::test]
async fn test_teacher_reads_course_register_filtered_by_date() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-010").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let student_user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, student_user.id, "S-020", "10-A").await;

    for day in [2, 3] {
        state
            .store
            .upsert_attendance(AttendanceUpsert {
                student_id: student.id,
                course_id: course.id,
                date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
                status: AttendanceStatus::Present,
                marked_by: teacher.id,
                remarks: None,
            })
            .await
            .unwrap();
    }

    let token = token_for(&state, &teacher_user);
    let response = test_app(&state)
        .oneshot(get(
            &format!("/api/attendance?course_id={}&date=2026-03-03", course.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["date"], "2026-03-03");
    assert_eq!(rows[0]["roll_number"], "S-020");
}
