use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use uuid::Uuid;

use classtrack::config::jwt::JwtConfig;
use classtrack::modules::courses::model::{Course, NewCourse};
use classtrack::modules::students::model::{NewStudentProfile, StudentProfile};
use classtrack::modules::teachers::model::{NewTeacherProfile, TeacherProfile};
use classtrack::modules::users::model::{NewUser, Role, User, UserPatch, UserStatus};
use classtrack::router::init_router;
use classtrack::state::AppState;
use classtrack::utils::jwt::create_access_token;
use classtrack::utils::password::hash_password;

pub const TEST_PASSWORD: &str = "testpass123";

/// Fresh state on the in-memory store. Every test gets its own world.
pub fn test_state() -> AppState {
    AppState::in_memory(JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    })
}

pub fn test_app(state: &AppState) -> Router {
    init_router(state.clone())
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub async fn seed_user(state: &AppState, email: &str, role: Role) -> User {
    state
        .store
        .create_user(NewUser {
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role,
            full_name: format!("Test {}", role.as_str()),
            phone: None,
        })
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn deactivate_user(state: &AppState, id: Uuid) {
    state
        .store
        .update_user(
            id,
            UserPatch {
                status: Some(UserStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn seed_student(
    state: &AppState,
    user_id: Uuid,
    roll_number: &str,
    class_section: &str,
) -> StudentProfile {
    state
        .store
        .create_student(NewStudentProfile {
            user_id,
            roll_number: roll_number.to_string(),
            class_section: class_section.to_string(),
        })
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn seed_teacher(state: &AppState, user_id: Uuid, employee_id: &str) -> TeacherProfile {
    state
        .store
        .create_teacher(NewTeacherProfile {
            user_id,
            employee_id: employee_id.to_string(),
            department: None,
        })
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn seed_course(
    state: &AppState,
    course_code: &str,
    class_section: &str,
    teacher_id: Option<Uuid>,
) -> Course {
    state
        .store
        .create_course(NewCourse {
            course_code: course_code.to_string(),
            course_name: format!("Course {}", course_code),
            class_section: class_section.to_string(),
            credits: 3,
            teacher_id,
        })
        .await
        .unwrap()
}

pub fn token_for(state: &AppState, user: &User) -> String {
    create_access_token(user, &state.jwt_config).unwrap()
}

pub fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn send_json(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!("Response was not JSON: {:?}", String::from_utf8_lossy(&body))
    })
}
