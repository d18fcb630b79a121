//! Storage collaborator.
//!
//! The core never embeds SQL. [`Store`] is the contract the query layer
//! composes filter predicates against: filtered selects, joined selects
//! (returned pre-flattened), inserts, updates, deletes, and upserts with
//! named conflict keys. Two implementations exist:
//!
//! - [`postgres::PgStore`]: sqlx/PostgreSQL, the production backend
//! - [`memory::MemStore`]: in-memory backend for tests and local runs
//!
//! Conflict keys:
//!
//! - attendance: `(student_id, course_id, date)`
//! - submissions: `(assignment_id, student_id)`

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::modules::attendance::model::{
    Attendance, AttendanceReportRow, AttendanceStatus, AttendanceUpsert, CourseAttendanceRow,
    StudentAttendanceRow,
};
use crate::modules::assignments::model::{Assignment, AssignmentDetail, NewAssignment};
use crate::modules::courses::model::{Course, CourseDetail, NewCourse};
use crate::modules::feedback::model::{Feedback, FeedbackDetail, NewFeedback};
use crate::modules::marks::model::{CourseMarkRow, Mark, MarkReportRow, MarkWithCourse, NewMark};
use crate::modules::notifications::model::{NewNotification, Notification};
use crate::modules::students::model::{
    NewStudentProfile, StudentContactPatch, StudentDetail, StudentProfile,
};
use crate::modules::submissions::model::{Submission, SubmissionDetail, SubmissionUpsert};
use crate::modules::teachers::model::{NewTeacherProfile, TeacherDetail, TeacherProfile};
use crate::modules::users::model::{NewUser, Role, User, UserPatch};

/// Opaque collaborator failure. Callers log it and surface HTTP 500
/// without interpreting it further.
#[derive(Debug)]
pub struct StoreError(anyhow::Error);

impl StoreError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self(err.into())
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::new(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// User row with its password hash, for credential verification only.
#[derive(Debug, Clone)]
pub struct LoginRow {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait Store: Send + Sync {
    // --- users ---
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
    async fn list_users(&self, limit: i64, offset: i64) -> StoreResult<(Vec<User>, i64)>;
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn email_exists(&self, email: &str) -> StoreResult<bool>;
    /// Active accounts only; inactive users cannot log in.
    async fn find_user_for_login(&self, email: &str) -> StoreResult<Option<LoginRow>>;
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<Option<User>>;
    async fn delete_user(&self, id: Uuid) -> StoreResult<bool>;

    // --- student profiles ---
    async fn create_student(&self, profile: NewStudentProfile) -> StoreResult<StudentProfile>;
    async fn list_students(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<StudentDetail>, i64)>;
    async fn find_student(&self, id: Uuid) -> StoreResult<Option<StudentProfile>>;
    async fn find_student_by_user(&self, user_id: Uuid) -> StoreResult<Option<StudentProfile>>;
    async fn student_detail_by_user(&self, user_id: Uuid) -> StoreResult<Option<StudentDetail>>;
    async fn students_in_section(&self, class_section: &str) -> StoreResult<Vec<StudentDetail>>;
    async fn update_student_contact(
        &self,
        id: Uuid,
        patch: StudentContactPatch,
    ) -> StoreResult<Option<StudentProfile>>;

    // --- teacher profiles ---
    async fn create_teacher(&self, profile: NewTeacherProfile) -> StoreResult<TeacherProfile>;
    async fn list_teachers(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<TeacherDetail>, i64)>;
    async fn find_teacher(&self, id: Uuid) -> StoreResult<Option<TeacherProfile>>;
    async fn find_teacher_by_user(&self, user_id: Uuid) -> StoreResult<Option<TeacherProfile>>;

    // --- courses ---
    async fn create_course(&self, course: NewCourse) -> StoreResult<Course>;
    async fn list_courses(&self) -> StoreResult<Vec<CourseDetail>>;
    async fn courses_by_teacher(&self, teacher_id: Uuid) -> StoreResult<Vec<CourseDetail>>;
    async fn courses_in_section(&self, class_section: &str) -> StoreResult<Vec<CourseDetail>>;
    async fn find_course(&self, id: Uuid) -> StoreResult<Option<Course>>;

    // --- attendance ---
    async fn upsert_attendance(&self, record: AttendanceUpsert) -> StoreResult<Attendance>;
    async fn find_attendance(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Option<Attendance>>;
    async fn attendance_for_student(
        &self,
        student_id: Uuid,
    ) -> StoreResult<Vec<StudentAttendanceRow>>;
    async fn attendance_for_course(
        &self,
        course_id: Uuid,
        date: Option<NaiveDate>,
    ) -> StoreResult<Vec<CourseAttendanceRow>>;
    async fn attendance_report(&self, limit: i64) -> StoreResult<Vec<AttendanceReportRow>>;
    async fn attendance_statuses_for_student(
        &self,
        student_id: Uuid,
    ) -> StoreResult<Vec<AttendanceStatus>>;
    async fn count_attendance_on(&self, date: NaiveDate) -> StoreResult<i64>;
    async fn count_attendance_marked_by(
        &self,
        teacher_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<i64>;

    // --- assignments ---
    async fn create_assignment(&self, assignment: NewAssignment) -> StoreResult<Assignment>;
    async fn find_assignment(&self, id: Uuid) -> StoreResult<Option<Assignment>>;
    async fn list_assignments(&self) -> StoreResult<Vec<AssignmentDetail>>;
    async fn assignments_by_creator(&self, teacher_id: Uuid) -> StoreResult<Vec<AssignmentDetail>>;
    async fn assignments_in_section(
        &self,
        class_section: &str,
    ) -> StoreResult<Vec<AssignmentDetail>>;
    async fn count_upcoming_by_creator(
        &self,
        teacher_id: Uuid,
        now: DateTime<Utc>,
    ) -> StoreResult<i64>;
    /// Assignments due after `now` with no submission row from the
    /// student. Any submission row removes pending status.
    async fn count_pending_assignments(
        &self,
        student_id: Uuid,
        class_section: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<i64>;

    // --- submissions ---
    async fn upsert_submission(&self, submission: SubmissionUpsert) -> StoreResult<Submission>;
    async fn find_submission(&self, id: Uuid) -> StoreResult<Option<Submission>>;
    async fn submissions_for_assignment(
        &self,
        assignment_id: Uuid,
    ) -> StoreResult<Vec<SubmissionDetail>>;
    async fn submissions_by_student(&self, student_id: Uuid) -> StoreResult<Vec<Submission>>;
    /// Writes marks and feedback; `graded_at` is set to the given instant
    /// only if it is currently unset.
    async fn grade_submission(
        &self,
        id: Uuid,
        marks_obtained: i32,
        feedback: Option<String>,
        graded_at: DateTime<Utc>,
    ) -> StoreResult<Option<Submission>>;

    // --- marks ---
    async fn insert_mark(&self, mark: NewMark) -> StoreResult<Mark>;
    async fn marks_for_student(&self, student_id: Uuid) -> StoreResult<Vec<MarkWithCourse>>;
    async fn marks_for_course(&self, course_id: Uuid) -> StoreResult<Vec<CourseMarkRow>>;
    async fn recent_marks_for_student(
        &self,
        student_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<Mark>>;
    async fn marks_report(&self, limit: i64) -> StoreResult<Vec<MarkReportRow>>;

    // --- notifications ---
    async fn create_notification(&self, notification: NewNotification)
    -> StoreResult<Notification>;
    /// Unexpired notifications targeted at `all` or the given role,
    /// newest first.
    async fn active_notifications(
        &self,
        role: Role,
        now: DateTime<Utc>,
        limit: i64,
    ) -> StoreResult<Vec<Notification>>;
    async fn list_notifications(&self) -> StoreResult<Vec<Notification>>;

    // --- feedback ---
    async fn create_feedback(&self, feedback: NewFeedback) -> StoreResult<Feedback>;
    async fn list_feedback(&self) -> StoreResult<Vec<FeedbackDetail>>;

    // --- counts for the admin dashboard ---
    async fn count_students(&self) -> StoreResult<i64>;
    async fn count_teachers(&self) -> StoreResult<i64>;
    async fn count_courses(&self) -> StoreResult<i64>;
}
