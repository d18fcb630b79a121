//! PostgreSQL [`Store`] backend built on sqlx.
//!
//! The attendance and submission conflict keys map to unique indexes, so
//! the upserts are plain `ON CONFLICT ... DO UPDATE` statements.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{LoginRow, Store, StoreResult};
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

const USER_COLUMNS: &str = "id, email, role, full_name, phone, status, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LoginRecord {
    id: Uuid,
    email: String,
    role: Role,
    full_name: String,
    phone: Option<String>,
    status: crate::modules::users::model::UserStatus,
    created_at: DateTime<Utc>,
    password_hash: String,
}

impl From<LoginRecord> for LoginRow {
    fn from(record: LoginRecord) -> Self {
        LoginRow {
            user: User {
                id: record.id,
                email: record.email,
                role: record.role,
                full_name: record.full_name,
                phone: record.phone,
                status: record.status,
                created_at: record.created_at,
            },
            password_hash: record.password_hash,
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, role, full_name, phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, email, role, full_name, phone, status, created_at",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.full_name)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_users(&self, limit: i64, offset: i64) -> StoreResult<(Vec<User>, i64)> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let users = sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok((users, total))
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn find_user_for_login(&self, email: &str) -> StoreResult<Option<LoginRow>> {
        let record = sqlx::query_as::<_, LoginRecord>(
            "SELECT id, email, role, full_name, phone, status, created_at, password_hash
             FROM users WHERE email = $1 AND status = 'active'",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(LoginRow::from))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            "UPDATE users SET
                 email = COALESCE($2, email),
                 password_hash = COALESCE($3, password_hash),
                 role = COALESCE($4, role),
                 full_name = COALESCE($5, full_name),
                 phone = COALESCE($6, phone),
                 status = COALESCE($7, status)
             WHERE id = $1
             RETURNING id, email, role, full_name, phone, status, created_at",
        )
        .bind(id)
        .bind(&patch.email)
        .bind(&patch.password_hash)
        .bind(patch.role)
        .bind(&patch.full_name)
        .bind(&patch.phone)
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_student(&self, profile: NewStudentProfile) -> StoreResult<StudentProfile> {
        let row = sqlx::query_as::<_, StudentProfile>(
            "INSERT INTO student_profiles (user_id, roll_number, class_section)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, roll_number, class_section, address,
                       guardian_name, guardian_phone",
        )
        .bind(profile.user_id)
        .bind(&profile.roll_number)
        .bind(&profile.class_section)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_students(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<StudentDetail>, i64)> {
        let students = sqlx::query_as::<_, StudentDetail>(
            "SELECT sp.id, sp.user_id, sp.roll_number, sp.class_section, sp.address,
                    sp.guardian_name, sp.guardian_phone,
                    u.full_name, u.email, u.phone, u.status
             FROM student_profiles sp
             JOIN users u ON u.id = sp.user_id
             ORDER BY sp.roll_number
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student_profiles")
            .fetch_one(&self.pool)
            .await?;
        Ok((students, total))
    }

    async fn find_student(&self, id: Uuid) -> StoreResult<Option<StudentProfile>> {
        let row = sqlx::query_as::<_, StudentProfile>(
            "SELECT id, user_id, roll_number, class_section, address,
                    guardian_name, guardian_phone
             FROM student_profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_student_by_user(&self, user_id: Uuid) -> StoreResult<Option<StudentProfile>> {
        let row = sqlx::query_as::<_, StudentProfile>(
            "SELECT id, user_id, roll_number, class_section, address,
                    guardian_name, guardian_phone
             FROM student_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn student_detail_by_user(&self, user_id: Uuid) -> StoreResult<Option<StudentDetail>> {
        let row = sqlx::query_as::<_, StudentDetail>(
            "SELECT sp.id, sp.user_id, sp.roll_number, sp.class_section, sp.address,
                    sp.guardian_name, sp.guardian_phone,
                    u.full_name, u.email, u.phone, u.status
             FROM student_profiles sp
             JOIN users u ON u.id = sp.user_id
             WHERE sp.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn students_in_section(&self, class_section: &str) -> StoreResult<Vec<StudentDetail>> {
        let rows = sqlx::query_as::<_, StudentDetail>(
            "SELECT sp.id, sp.user_id, sp.roll_number, sp.class_section, sp.address,
                    sp.guardian_name, sp.guardian_phone,
                    u.full_name, u.email, u.phone, u.status
             FROM student_profiles sp
             JOIN users u ON u.id = sp.user_id
             WHERE sp.class_section = $1
             ORDER BY sp.roll_number",
        )
        .bind(class_section)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_student_contact(
        &self,
        id: Uuid,
        patch: StudentContactPatch,
    ) -> StoreResult<Option<StudentProfile>> {
        let row = sqlx::query_as::<_, StudentProfile>(
            "UPDATE student_profiles SET
                 address = COALESCE($2, address),
                 guardian_name = COALESCE($3, guardian_name),
                 guardian_phone = COALESCE($4, guardian_phone)
             WHERE id = $1
             RETURNING id, user_id, roll_number, class_section, address,
                       guardian_name, guardian_phone",
        )
        .bind(id)
        .bind(&patch.address)
        .bind(&patch.guardian_name)
        .bind(&patch.guardian_phone)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_teacher(&self, profile: NewTeacherProfile) -> StoreResult<TeacherProfile> {
        let row = sqlx::query_as::<_, TeacherProfile>(
            "INSERT INTO teacher_profiles (user_id, employee_id, department)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, employee_id, department",
        )
        .bind(profile.user_id)
        .bind(&profile.employee_id)
        .bind(&profile.department)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_teachers(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<TeacherDetail>, i64)> {
        let teachers = sqlx::query_as::<_, TeacherDetail>(
            "SELECT tp.id, tp.user_id, tp.employee_id, tp.department,
                    u.full_name, u.email, u.phone, u.status
             FROM teacher_profiles tp
             JOIN users u ON u.id = tp.user_id
             ORDER BY tp.employee_id
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teacher_profiles")
            .fetch_one(&self.pool)
            .await?;
        Ok((teachers, total))
    }

    async fn find_teacher(&self, id: Uuid) -> StoreResult<Option<TeacherProfile>> {
        let row = sqlx::query_as::<_, TeacherProfile>(
            "SELECT id, user_id, employee_id, department
             FROM teacher_profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_teacher_by_user(&self, user_id: Uuid) -> StoreResult<Option<TeacherProfile>> {
        let row = sqlx::query_as::<_, TeacherProfile>(
            "SELECT id, user_id, employee_id, department
             FROM teacher_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_course(&self, course: NewCourse) -> StoreResult<Course> {
        let row = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (course_code, course_name, class_section, credits, teacher_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, course_code, course_name, class_section, credits, teacher_id",
        )
        .bind(&course.course_code)
        .bind(&course.course_name)
        .bind(&course.class_section)
        .bind(course.credits)
        .bind(course.teacher_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_courses(&self) -> StoreResult<Vec<CourseDetail>> {
        let rows = sqlx::query_as::<_, CourseDetail>(
            "SELECT c.id, c.course_code, c.course_name, c.class_section, c.credits,
                    c.teacher_id, u.full_name AS teacher_name,
                    tp.employee_id AS teacher_employee_id
             FROM courses c
             LEFT JOIN teacher_profiles tp ON tp.id = c.teacher_id
             LEFT JOIN users u ON u.id = tp.user_id
             ORDER BY c.course_code",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn courses_by_teacher(&self, teacher_id: Uuid) -> StoreResult<Vec<CourseDetail>> {
        let rows = sqlx::query_as::<_, CourseDetail>(
            "SELECT c.id, c.course_code, c.course_name, c.class_section, c.credits,
                    c.teacher_id, u.full_name AS teacher_name,
                    tp.employee_id AS teacher_employee_id
             FROM courses c
             LEFT JOIN teacher_profiles tp ON tp.id = c.teacher_id
             LEFT JOIN users u ON u.id = tp.user_id
             WHERE c.teacher_id = $1
             ORDER BY c.course_code",
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn courses_in_section(&self, class_section: &str) -> StoreResult<Vec<CourseDetail>> {
        let rows = sqlx::query_as::<_, CourseDetail>(
            "SELECT c.id, c.course_code, c.course_name, c.class_section, c.credits,
                    c.teacher_id, u.full_name AS teacher_name,
                    tp.employee_id AS teacher_employee_id
             FROM courses c
             LEFT JOIN teacher_profiles tp ON tp.id = c.teacher_id
             LEFT JOIN users u ON u.id = tp.user_id
             WHERE c.class_section = $1
             ORDER BY c.course_code",
        )
        .bind(class_section)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_course(&self, id: Uuid) -> StoreResult<Option<Course>> {
        let row = sqlx::query_as::<_, Course>(
            "SELECT id, course_code, course_name, class_section, credits, teacher_id
             FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn upsert_attendance(&self, record: AttendanceUpsert) -> StoreResult<Attendance> {
        let row = sqlx::query_as::<_, Attendance>(
            "INSERT INTO attendance (student_id, course_id, date, status, marked_by, remarks)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (student_id, course_id, date) DO UPDATE SET
                 status = EXCLUDED.status,
                 marked_by = EXCLUDED.marked_by,
                 remarks = EXCLUDED.remarks
             RETURNING id, student_id, course_id, date, status, marked_by, remarks",
        )
        .bind(record.student_id)
        .bind(record.course_id)
        .bind(record.date)
        .bind(record.status)
        .bind(record.marked_by)
        .bind(&record.remarks)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_attendance(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Option<Attendance>> {
        let row = sqlx::query_as::<_, Attendance>(
            "SELECT id, student_id, course_id, date, status, marked_by, remarks
             FROM attendance
             WHERE student_id = $1 AND course_id = $2 AND date = $3",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn attendance_for_student(
        &self,
        student_id: Uuid,
    ) -> StoreResult<Vec<StudentAttendanceRow>> {
        let rows = sqlx::query_as::<_, StudentAttendanceRow>(
            "SELECT a.id, a.course_id, a.date, a.status, a.remarks,
                    c.course_name, c.course_code
             FROM attendance a
             JOIN courses c ON c.id = a.course_id
             WHERE a.student_id = $1
             ORDER BY a.date DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn attendance_for_course(
        &self,
        course_id: Uuid,
        date: Option<NaiveDate>,
    ) -> StoreResult<Vec<CourseAttendanceRow>> {
        let rows = sqlx::query_as::<_, CourseAttendanceRow>(
            "SELECT a.id, a.student_id, a.date, a.status, a.remarks,
                    sp.roll_number, u.full_name
             FROM attendance a
             JOIN student_profiles sp ON sp.id = a.student_id
             JOIN users u ON u.id = sp.user_id
             WHERE a.course_id = $1 AND ($2::date IS NULL OR a.date = $2)
             ORDER BY a.date DESC, sp.roll_number",
        )
        .bind(course_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn attendance_report(&self, limit: i64) -> StoreResult<Vec<AttendanceReportRow>> {
        let rows = sqlx::query_as::<_, AttendanceReportRow>(
            "SELECT a.id, a.student_id, a.course_id, a.date, a.status,
                    sp.roll_number, u.full_name, c.course_name, c.course_code
             FROM attendance a
             JOIN student_profiles sp ON sp.id = a.student_id
             JOIN users u ON u.id = sp.user_id
             JOIN courses c ON c.id = a.course_id
             ORDER BY a.date DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn attendance_statuses_for_student(
        &self,
        student_id: Uuid,
    ) -> StoreResult<Vec<AttendanceStatus>> {
        let rows: Vec<AttendanceStatus> =
            sqlx::query_scalar("SELECT status FROM attendance WHERE student_id = $1")
                .bind(student_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn count_attendance_on(&self, date: NaiveDate) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE date = $1")
            .bind(date)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_attendance_marked_by(
        &self,
        teacher_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT course_id) FROM attendance
             WHERE marked_by = $1 AND date = $2",
        )
        .bind(teacher_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn create_assignment(&self, assignment: NewAssignment) -> StoreResult<Assignment> {
        let row = sqlx::query_as::<_, Assignment>(
            "INSERT INTO assignments (course_id, title, description, due_date, total_marks, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, course_id, title, description, due_date, total_marks,
                       created_by, created_at",
        )
        .bind(assignment.course_id)
        .bind(&assignment.title)
        .bind(&assignment.description)
        .bind(assignment.due_date)
        .bind(assignment.total_marks)
        .bind(assignment.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_assignment(&self, id: Uuid) -> StoreResult<Option<Assignment>> {
        let row = sqlx::query_as::<_, Assignment>(
            "SELECT id, course_id, title, description, due_date, total_marks,
                    created_by, created_at
             FROM assignments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_assignments(&self) -> StoreResult<Vec<AssignmentDetail>> {
        let rows = sqlx::query_as::<_, AssignmentDetail>(
            "SELECT a.id, a.course_id, a.title, a.description, a.due_date, a.total_marks,
                    a.created_by, a.created_at, c.course_name, c.course_code
             FROM assignments a
             JOIN courses c ON c.id = a.course_id
             ORDER BY a.due_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn assignments_by_creator(&self, teacher_id: Uuid) -> StoreResult<Vec<AssignmentDetail>> {
        let rows = sqlx::query_as::<_, AssignmentDetail>(
            "SELECT a.id, a.course_id, a.title, a.description, a.due_date, a.total_marks,
                    a.created_by, a.created_at, c.course_name, c.course_code
             FROM assignments a
             JOIN courses c ON c.id = a.course_id
             WHERE a.created_by = $1
             ORDER BY a.due_date DESC",
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn assignments_in_section(
        &self,
        class_section: &str,
    ) -> StoreResult<Vec<AssignmentDetail>> {
        let rows = sqlx::query_as::<_, AssignmentDetail>(
            "SELECT a.id, a.course_id, a.title, a.description, a.due_date, a.total_marks,
                    a.created_by, a.created_at, c.course_name, c.course_code
             FROM assignments a
             JOIN courses c ON c.id = a.course_id
             WHERE c.class_section = $1
             ORDER BY a.due_date DESC",
        )
        .bind(class_section)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_upcoming_by_creator(
        &self,
        teacher_id: Uuid,
        now: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM assignments WHERE created_by = $1 AND due_date >= $2",
        )
        .bind(teacher_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_pending_assignments(
        &self,
        student_id: Uuid,
        class_section: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM assignments a
             JOIN courses c ON c.id = a.course_id
             WHERE c.class_section = $1
               AND a.due_date >= $2
               AND NOT EXISTS (
                   SELECT 1 FROM submissions s
                   WHERE s.assignment_id = a.id AND s.student_id = $3
               )",
        )
        .bind(class_section)
        .bind(now)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn upsert_submission(&self, submission: SubmissionUpsert) -> StoreResult<Submission> {
        let row = sqlx::query_as::<_, Submission>(
            "INSERT INTO submissions (assignment_id, student_id, submission_text, file_url, submitted_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (assignment_id, student_id) DO UPDATE SET
                 submission_text = EXCLUDED.submission_text,
                 file_url = EXCLUDED.file_url,
                 submitted_at = EXCLUDED.submitted_at
             RETURNING id, assignment_id, student_id, submission_text, file_url,
                       submitted_at, marks_obtained, feedback, graded_at",
        )
        .bind(submission.assignment_id)
        .bind(submission.student_id)
        .bind(&submission.submission_text)
        .bind(&submission.file_url)
        .bind(submission.submitted_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_submission(&self, id: Uuid) -> StoreResult<Option<Submission>> {
        let row = sqlx::query_as::<_, Submission>(
            "SELECT id, assignment_id, student_id, submission_text, file_url,
                    submitted_at, marks_obtained, feedback, graded_at
             FROM submissions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn submissions_for_assignment(
        &self,
        assignment_id: Uuid,
    ) -> StoreResult<Vec<SubmissionDetail>> {
        let rows = sqlx::query_as::<_, SubmissionDetail>(
            "SELECT s.id, s.assignment_id, s.student_id, s.submission_text, s.file_url,
                    s.submitted_at, s.marks_obtained, s.feedback, s.graded_at,
                    sp.roll_number, u.full_name
             FROM submissions s
             JOIN student_profiles sp ON sp.id = s.student_id
             JOIN users u ON u.id = sp.user_id
             WHERE s.assignment_id = $1
             ORDER BY sp.roll_number",
        )
        .bind(assignment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn submissions_by_student(&self, student_id: Uuid) -> StoreResult<Vec<Submission>> {
        let rows = sqlx::query_as::<_, Submission>(
            "SELECT id, assignment_id, student_id, submission_text, file_url,
                    submitted_at, marks_obtained, feedback, graded_at
             FROM submissions WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn grade_submission(
        &self,
        id: Uuid,
        marks_obtained: i32,
        feedback: Option<String>,
        graded_at: DateTime<Utc>,
    ) -> StoreResult<Option<Submission>> {
        let row = sqlx::query_as::<_, Submission>(
            "UPDATE submissions SET
                 marks_obtained = $2,
                 feedback = $3,
                 graded_at = COALESCE(graded_at, $4)
             WHERE id = $1
             RETURNING id, assignment_id, student_id, submission_text, file_url,
                       submitted_at, marks_obtained, feedback, graded_at",
        )
        .bind(id)
        .bind(marks_obtained)
        .bind(&feedback)
        .bind(graded_at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_mark(&self, mark: NewMark) -> StoreResult<Mark> {
        let row = sqlx::query_as::<_, Mark>(
            "INSERT INTO marks (student_id, course_id, exam_type, marks_obtained,
                                total_marks, exam_date, entered_by, remarks)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, student_id, course_id, exam_type, marks_obtained,
                       total_marks, exam_date, entered_by, remarks",
        )
        .bind(mark.student_id)
        .bind(mark.course_id)
        .bind(&mark.exam_type)
        .bind(mark.marks_obtained)
        .bind(mark.total_marks)
        .bind(mark.exam_date)
        .bind(mark.entered_by)
        .bind(&mark.remarks)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn marks_for_student(&self, student_id: Uuid) -> StoreResult<Vec<MarkWithCourse>> {
        let rows = sqlx::query_as::<_, MarkWithCourse>(
            "SELECT m.id, m.course_id, m.exam_type, m.marks_obtained, m.total_marks,
                    m.exam_date, m.remarks, c.course_name, c.course_code
             FROM marks m
             JOIN courses c ON c.id = m.course_id
             WHERE m.student_id = $1
             ORDER BY m.exam_date DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn marks_for_course(&self, course_id: Uuid) -> StoreResult<Vec<CourseMarkRow>> {
        let rows = sqlx::query_as::<_, CourseMarkRow>(
            "SELECT m.id, m.student_id, m.exam_type, m.marks_obtained, m.total_marks,
                    m.exam_date, m.remarks, sp.roll_number, u.full_name
             FROM marks m
             JOIN student_profiles sp ON sp.id = m.student_id
             JOIN users u ON u.id = sp.user_id
             WHERE m.course_id = $1
             ORDER BY m.exam_date DESC, sp.roll_number",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn recent_marks_for_student(
        &self,
        student_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<Mark>> {
        let rows = sqlx::query_as::<_, Mark>(
            "SELECT id, student_id, course_id, exam_type, marks_obtained,
                    total_marks, exam_date, entered_by, remarks
             FROM marks WHERE student_id = $1
             ORDER BY exam_date DESC
             LIMIT $2",
        )
        .bind(student_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn marks_report(&self, limit: i64) -> StoreResult<Vec<MarkReportRow>> {
        let rows = sqlx::query_as::<_, MarkReportRow>(
            "SELECT m.id, m.student_id, m.course_id, m.exam_type, m.marks_obtained,
                    m.total_marks, m.exam_date, sp.roll_number, u.full_name,
                    c.course_name, c.course_code
             FROM marks m
             JOIN student_profiles sp ON sp.id = m.student_id
             JOIN users u ON u.id = sp.user_id
             JOIN courses c ON c.id = m.course_id
             ORDER BY m.exam_date DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> StoreResult<Notification> {
        let row = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (title, message, created_by, target_role, priority, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, title, message, created_by, target_role, priority,
                       expires_at, created_at",
        )
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.created_by)
        .bind(notification.target_role)
        .bind(notification.priority)
        .bind(notification.expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn active_notifications(
        &self,
        role: Role,
        now: DateTime<Utc>,
        limit: i64,
    ) -> StoreResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(
            "SELECT id, title, message, created_by, target_role, priority,
                    expires_at, created_at
             FROM notifications
             WHERE (target_role = 'all' OR target_role = $1::target_role)
               AND expires_at > $2
             ORDER BY created_at DESC
             LIMIT $3",
        )
        .bind(role.as_str())
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_notifications(&self) -> StoreResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(
            "SELECT id, title, message, created_by, target_role, priority,
                    expires_at, created_at
             FROM notifications
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_feedback(&self, feedback: NewFeedback) -> StoreResult<Feedback> {
        let row = sqlx::query_as::<_, Feedback>(
            "INSERT INTO feedback (student_id, course_id, category, message, rating)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, student_id, course_id, category, message, rating,
                       status, created_at",
        )
        .bind(feedback.student_id)
        .bind(feedback.course_id)
        .bind(&feedback.category)
        .bind(&feedback.message)
        .bind(feedback.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_feedback(&self) -> StoreResult<Vec<FeedbackDetail>> {
        let rows = sqlx::query_as::<_, FeedbackDetail>(
            "SELECT f.id, f.student_id, f.course_id, f.category, f.message, f.rating,
                    f.status, f.created_at, sp.roll_number, u.full_name
             FROM feedback f
             JOIN student_profiles sp ON sp.id = f.student_id
             JOIN users u ON u.id = sp.user_id
             ORDER BY f.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_students(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student_profiles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_teachers(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teacher_profiles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_courses(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
