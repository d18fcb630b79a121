use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::assignments::model::{
    Assignment, AssignmentDetail, CreateAssignmentDto, StudentAssignmentView,
};
use crate::modules::attendance::model::{
    Attendance, AttendanceReportRow, AttendanceStatus, CourseAttendanceRow, MarkAttendanceDto,
    StudentAttendanceRow,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, MessageResponse};
use crate::modules::courses::model::{Course, CourseDetail, CreateCourseDto};
use crate::modules::dashboard::model::{AdminDashboard, StudentDashboard, TeacherDashboard};
use crate::modules::feedback::model::{Feedback, FeedbackDetail, SubmitFeedbackDto};
use crate::modules::marks::model::{
    CourseMarkRow, EnterMarkDto, Mark, MarkReportRow, StudentMarkView,
};
use crate::modules::notifications::model::{
    CreateNotificationDto, Notification, Priority, TargetRole,
};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, StudentDetail, StudentProfile,
    UpdateStudentContactDto,
};
use crate::modules::submissions::model::{
    GradeSubmissionDto, SubmitAssignmentDto, Submission, SubmissionDetail,
};
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, TeacherProfile,
};
use crate::modules::users::model::{
    CreateUserDto, PaginatedUsersResponse, Role, UpdateUserDto, User, UserStatus,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::my_profile,
        crate::modules::students::controller::update_my_contact,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::list_teachers,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::course_students,
        crate::modules::attendance::controller::mark_attendance,
        crate::modules::attendance::controller::list_attendance,
        crate::modules::assignments::controller::create_assignment,
        crate::modules::assignments::controller::list_assignments,
        crate::modules::assignments::controller::assignment_submissions,
        crate::modules::submissions::controller::submit_assignment,
        crate::modules::submissions::controller::grade_submission,
        crate::modules::marks::controller::enter_mark,
        crate::modules::marks::controller::list_marks,
        crate::modules::notifications::controller::create_notification,
        crate::modules::notifications::controller::list_notifications,
        crate::modules::feedback::controller::submit_feedback,
        crate::modules::feedback::controller::list_feedback,
        crate::modules::dashboard::controller::dashboard,
        crate::modules::dashboard::controller::attendance_report,
        crate::modules::dashboard::controller::marks_report,
    ),
    components(
        schemas(
            User,
            Role,
            UserStatus,
            CreateUserDto,
            UpdateUserDto,
            PaginatedUsersResponse,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            ErrorResponse,
            StudentProfile,
            StudentDetail,
            CreateStudentDto,
            UpdateStudentContactDto,
            PaginatedStudentsResponse,
            TeacherProfile,
            CreateTeacherDto,
            PaginatedTeachersResponse,
            Course,
            CourseDetail,
            CreateCourseDto,
            Attendance,
            AttendanceStatus,
            MarkAttendanceDto,
            StudentAttendanceRow,
            CourseAttendanceRow,
            AttendanceReportRow,
            Assignment,
            AssignmentDetail,
            CreateAssignmentDto,
            StudentAssignmentView,
            Submission,
            SubmissionDetail,
            SubmitAssignmentDto,
            GradeSubmissionDto,
            Mark,
            EnterMarkDto,
            StudentMarkView,
            CourseMarkRow,
            MarkReportRow,
            Notification,
            TargetRole,
            Priority,
            CreateNotificationDto,
            Feedback,
            FeedbackDetail,
            SubmitFeedbackDto,
            AdminDashboard,
            TeacherDashboard,
            StudentDashboard,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, logout, and session introspection"),
        (name = "Users", description = "Account administration"),
        (name = "Students", description = "Student profile management"),
        (name = "Teachers", description = "Teacher profile management"),
        (name = "Courses", description = "Courses and section rosters"),
        (name = "Attendance", description = "Daily attendance registers"),
        (name = "Assignments", description = "Assignments and their submissions"),
        (name = "Submissions", description = "Student submissions and grading"),
        (name = "Marks", description = "Exam marks"),
        (name = "Notifications", description = "Role-targeted announcements"),
        (name = "Feedback", description = "Student feedback"),
        (name = "Dashboard", description = "Per-role dashboards and admin reports"),
        (name = "Reports", description = "School-wide admin reports")
    ),
    info(
        title = "Classtrack API",
        version = "0.1.0",
        description = "A school management REST API built with Rust, Axum, and PostgreSQL. Every read and write is scoped by the authenticated principal's role.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
