mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use classtrack::modules::assignments::model::NewAssignment;
use classtrack::modules::attendance::model::{AttendanceStatus, AttendanceUpsert};
use classtrack::modules::users::model::Role;
use common::{
    body_json, generate_unique_email, get, seed_course, seed_student, seed_teacher, seed_user,
    test_app, test_state, token_for,
};
use tower::ServiceExt;

#[tokio::test]
async fn test_admin_dashboard_counts_the_school() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;

    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-001").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;

    for roll in ["S-001", "S-002"] {
        let user = seed_user(&state, &generate_unique_email(), Role::Student).await;
        let student = seed_student(&state, user.id, roll, "10-A").await;
        state
            .store
            .upsert_attendance(AttendanceUpsert {
                student_id: student.id,
                course_id: course.id,
                date: Utc::now().date_naive(),
                status: AttendanceStatus::Present,
                marked_by: teacher.id,
                remarks: None,
            })
            .await
            .unwrap();
    }

    let token = token_for(&state, &admin);
    let response = test_app(&state)
        .oneshot(get("/api/dashboard", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_students"], 2);
    assert_eq!(body["total_teachers"], 1);
    assert_eq!(body["total_courses"], 1);
    assert_eq!(body["today_attendance"], 2);
}

#[tokio::test]
async fn test_teacher_dashboard_reflects_own_workload() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-002").await;
    let course_a = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let course_b = seed_course(&state, "MATH201", "11-B", Some(teacher.id)).await;

    let user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, user.id, "S-010", "10-A").await;
    state
        .store
        .upsert_attendance(AttendanceUpsert {
            student_id: student.id,
            course_id: course_a.id,
            date: Utc::now().date_naive(),
            status: AttendanceStatus::Present,
            marked_by: teacher.id,
            remarks: None,
        })
        .await
        .unwrap();

    // One assignment still open, one already past its deadline.
    for (course_id, days) in [(course_a.id, 7), (course_b.id, -7)] {
        state
            .store
            .create_assignment(NewAssignment {
                course_id,
                title: "Work".to_string(),
                description: None,
                due_date: Utc::now() + Duration::days(days),
                total_marks: 100,
                created_by: teacher.id,
            })
            .await
            .unwrap();
    }

    let token = token_for(&state, &teacher_user);
    let response = test_app(&state)
        .oneshot(get("/api/dashboard", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["teacher_id"], teacher.id.to_string());
    assert_eq!(body["my_courses"], 2);
    assert_eq!(body["today_classes"], 1);
    assert_eq!(body["upcoming_assignments"], 1);
}

#[tokio::test]
async fn test_student_dashboard_derives_attendance_and_pending_work() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-003").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;

    let user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, user.id, "S-020", "10-A").await;

    // 3 present out of 4 classes.
    let statuses = [
        AttendanceStatus::Present,
        AttendanceStatus::Present,
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
    ];
    for (i, status) in statuses.into_iter().enumerate() {
        state
            .store
            .upsert_attendance(AttendanceUpsert {
                student_id: student.id,
                course_id: course.id,
                date: Utc::now().date_naive() - Duration::days(i as i64),
                status,
                marked_by: teacher.id,
                remarks: None,
            })
            .await
            .unwrap();
    }

    // An open assignment with no submission yet.
    state
        .store
        .create_assignment(NewAssignment {
            course_id: course.id,
            title: "Homework".to_string(),
            description: None,
            due_date: Utc::now() + Duration::days(3),
            total_marks: 100,
            created_by: teacher.id,
        })
        .await
        .unwrap();

    let token = token_for(&state, &user);
    let response = test_app(&state)
        .oneshot(get("/api/dashboard", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["student_id"], student.id.to_string());
    assert_eq!(body["total_classes"], 4);
    assert_eq!(body["present_classes"], 3);
    assert_eq!(body["attendance_percentage"], 75.0);
    assert_eq!(body["pending_assignments"], 1);
    assert!(body["recent_marks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_student_dashboard_without_records_is_all_zeroes() {
    let state = test_state();
    let user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, user.id, "S-030", "10-A").await;

    let token = token_for(&state, &user);
    let response = test_app(&state)
        .oneshot(get("/api/dashboard", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["student_id"], student.id.to_string());
    assert_eq!(body["total_classes"], 0);
    assert_eq!(body["attendance_percentage"], 0.0);
}

#[tokio::test]
async fn test_reports_are_admin_only() {
    let state = test_state();
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    seed_teacher(&state, teacher_user.id, "T-004").await;

    let token = token_for(&state, &teacher_user);
    for uri in ["/api/reports/attendance", "/api/reports/marks"] {
        let response = test_app(&state).oneshot(get(uri, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_admin_attendance_report_joins_both_ways() {
    let state = test_state();
    let admin = seed_user(&state, &generate_unique_email(), Role::Admin).await;
    let teacher_user = seed_user(&state, &generate_unique_email(), Role::Teacher).await;
    let teacher = seed_teacher(&state, teacher_user.id, "T-005").await;
    let course = seed_course(&state, "MATH101", "10-A", Some(teacher.id)).await;
    let user = seed_user(&state, &generate_unique_email(), Role::Student).await;
    let student = seed_student(&state, user.id, "S-040", "10-A").await;

    state
        .store
        .upsert_attendance(AttendanceUpsert {
            student_id: student.id,
            course_id: course.id,
            date: Utc::now().date_naive(),
            status: AttendanceStatus::Late,
            marked_by: teacher.id,
            remarks: None,
        })
        .await
        .unwrap();

    let token = token_for(&state, &admin);
    let response = test_app(&state)
        .oneshot(get("/api/reports/attendance", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["roll_number"], "S-040");
    assert_eq!(rows[0]["course_code"], "MATH101");
    assert_eq!(rows[0]["status"], "late");
}
