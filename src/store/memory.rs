//! In-memory [`Store`] backend.
//!
//! Backs the test suite and local runs without PostgreSQL. Mirrors the
//! SQL backend's semantics, including the attendance and submission
//! conflict keys and the join shapes of the listing queries.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
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
use crate::modules::notifications::model::{NewNotification, Notification, TargetRole};
use crate::modules::students::model::{
    NewStudentProfile, StudentContactPatch, StudentDetail, StudentProfile,
};
use crate::modules::submissions::model::{Submission, SubmissionDetail, SubmissionUpsert};
use crate::modules::teachers::model::{NewTeacherProfile, TeacherDetail, TeacherProfile};
use crate::modules::users::model::{NewUser, Role, User, UserPatch, UserStatus};

#[derive(Debug, Clone)]
struct UserRow {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Tables {
    users: Vec<UserRow>,
    students: Vec<StudentProfile>,
    teachers: Vec<TeacherProfile>,
    courses: Vec<Course>,
    attendance: Vec<Attendance>,
    assignments: Vec<Assignment>,
    submissions: Vec<Submission>,
    marks: Vec<Mark>,
    notifications: Vec<Notification>,
    feedback: Vec<Feedback>,
}

#[derive(Default)]
pub struct MemStore {
    tables: RwLock<Tables>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tables {
    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().map(|r| &r.user).find(|u| u.id == id)
    }

    fn student_detail(&self, profile: &StudentProfile) -> Option<StudentDetail> {
        let user = self.user(profile.user_id)?;
        Some(StudentDetail {
            id: profile.id,
            user_id: profile.user_id,
            roll_number: profile.roll_number.clone(),
            class_section: profile.class_section.clone(),
            address: profile.address.clone(),
            guardian_name: profile.guardian_name.clone(),
            guardian_phone: profile.guardian_phone.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            status: user.status,
        })
    }

    fn teacher_detail(&self, profile: &TeacherProfile) -> Option<TeacherDetail> {
        let user = self.user(profile.user_id)?;
        Some(TeacherDetail {
            id: profile.id,
            user_id: profile.user_id,
            employee_id: profile.employee_id.clone(),
            department: profile.department.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            status: user.status,
        })
    }

    fn course_detail(&self, course: &Course) -> CourseDetail {
        let teacher = course
            .teacher_id
            .and_then(|id| self.teachers.iter().find(|t| t.id == id));
        let teacher_name = teacher
            .and_then(|t| self.user(t.user_id))
            .map(|u| u.full_name.clone());
        CourseDetail {
            id: course.id,
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            class_section: course.class_section.clone(),
            credits: course.credits,
            teacher_id: course.teacher_id,
            teacher_name,
            teacher_employee_id: teacher.map(|t| t.employee_id.clone()),
        }
    }

    fn assignment_detail(&self, assignment: &Assignment) -> Option<AssignmentDetail> {
        let course = self.courses.iter().find(|c| c.id == assignment.course_id)?;
        Some(AssignmentDetail {
            id: assignment.id,
            course_id: assignment.course_id,
            title: assignment.title.clone(),
            description: assignment.description.clone(),
            due_date: assignment.due_date,
            total_marks: assignment.total_marks,
            created_by: assignment.created_by,
            created_at: assignment.created_at,
            course_name: course.course_name.clone(),
            course_code: course.course_code.clone(),
        })
    }

    fn student_identity(&self, student_id: Uuid) -> Option<(String, String)> {
        let profile = self.students.iter().find(|s| s.id == student_id)?;
        let user = self.user(profile.user_id)?;
        Some((profile.roll_number.clone(), user.full_name.clone()))
    }

    fn course_identity(&self, course_id: Uuid) -> Option<(String, String)> {
        let course = self.courses.iter().find(|c| c.id == course_id)?;
        Some((course.course_name.clone(), course.course_code.clone()))
    }
}

fn page<T: Clone>(rows: &[T], limit: i64, offset: i64) -> (Vec<T>, i64) {
    let total = rows.len() as i64;
    let slice = rows
        .iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect();
    (slice, total)
}

#[async_trait]
impl Store for MemStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().unwrap();
        let row = UserRow {
            user: User {
                id: Uuid::new_v4(),
                email: user.email,
                role: user.role,
                full_name: user.full_name,
                phone: user.phone,
                status: UserStatus::Active,
                created_at: Utc::now(),
            },
            password_hash: user.password_hash,
        };
        tables.users.push(row.clone());
        Ok(row.user)
    }

    async fn list_users(&self, limit: i64, offset: i64) -> StoreResult<(Vec<User>, i64)> {
        let tables = self.tables.read().unwrap();
        let mut users: Vec<User> = tables.users.iter().map(|r| r.user.clone()).collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(&users, limit, offset))
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.user(id).cloned())
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let tables = self.tables.read().unwrap();
        Ok(tables.users.iter().any(|r| r.user.email == email))
    }

    async fn find_user_for_login(&self, email: &str) -> StoreResult<Option<LoginRow>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|r| r.user.email == email && r.user.status == UserStatus::Active)
            .map(|r| LoginRow {
                user: r.user.clone(),
                password_hash: r.password_hash.clone(),
            }))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().unwrap();
        let Some(row) = tables.users.iter_mut().find(|r| r.user.id == id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email {
            row.user.email = email;
        }
        if let Some(password_hash) = patch.password_hash {
            row.password_hash = password_hash;
        }
        if let Some(role) = patch.role {
            row.user.role = role;
        }
        if let Some(full_name) = patch.full_name {
            row.user.full_name = full_name;
        }
        if let Some(phone) = patch.phone {
            row.user.phone = Some(phone);
        }
        if let Some(status) = patch.status {
            row.user.status = status;
        }
        Ok(Some(row.user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().unwrap();
        let before = tables.users.len();
        tables.users.retain(|r| r.user.id != id);
        // FK cascade: the profile rows go with the account.
        tables.students.retain(|s| s.user_id != id);
        tables.teachers.retain(|t| t.user_id != id);
        Ok(tables.users.len() < before)
    }

    async fn create_student(&self, profile: NewStudentProfile) -> StoreResult<StudentProfile> {
        let mut tables = self.tables.write().unwrap();
        let row = StudentProfile {
            id: Uuid::new_v4(),
            user_id: profile.user_id,
            roll_number: profile.roll_number,
            class_section: profile.class_section,
            address: None,
            guardian_name: None,
            guardian_phone: None,
        };
        tables.students.push(row.clone());
        Ok(row)
    }

    async fn list_students(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<StudentDetail>, i64)> {
        let tables = self.tables.read().unwrap();
        let mut details: Vec<StudentDetail> = tables
            .students
            .iter()
            .filter_map(|s| tables.student_detail(s))
            .collect();
        details.sort_by(|a, b| a.roll_number.cmp(&b.roll_number));
        Ok(page(&details, limit, offset))
    }

    async fn find_student(&self, id: Uuid) -> StoreResult<Option<StudentProfile>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_student_by_user(&self, user_id: Uuid) -> StoreResult<Option<StudentProfile>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .students
            .iter()
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    async fn student_detail_by_user(&self, user_id: Uuid) -> StoreResult<Option<StudentDetail>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .students
            .iter()
            .find(|s| s.user_id == user_id)
            .and_then(|s| tables.student_detail(s)))
    }

    async fn students_in_section(&self, class_section: &str) -> StoreResult<Vec<StudentDetail>> {
        let tables = self.tables.read().unwrap();
        let mut details: Vec<StudentDetail> = tables
            .students
            .iter()
            .filter(|s| s.class_section == class_section)
            .filter_map(|s| tables.student_detail(s))
            .collect();
        details.sort_by(|a, b| a.roll_number.cmp(&b.roll_number));
        Ok(details)
    }

    async fn update_student_contact(
        &self,
        id: Uuid,
        patch: StudentContactPatch,
    ) -> StoreResult<Option<StudentProfile>> {
        let mut tables = self.tables.write().unwrap();
        let Some(profile) = tables.students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(address) = patch.address {
            profile.address = Some(address);
        }
        if let Some(guardian_name) = patch.guardian_name {
            profile.guardian_name = Some(guardian_name);
        }
        if let Some(guardian_phone) = patch.guardian_phone {
            profile.guardian_phone = Some(guardian_phone);
        }
        Ok(Some(profile.clone()))
    }

    async fn create_teacher(&self, profile: NewTeacherProfile) -> StoreResult<TeacherProfile> {
        let mut tables = self.tables.write().unwrap();
        let row = TeacherProfile {
            id: Uuid::new_v4(),
            user_id: profile.user_id,
            employee_id: profile.employee_id,
            department: profile.department,
        };
        tables.teachers.push(row.clone());
        Ok(row)
    }

    async fn list_teachers(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<TeacherDetail>, i64)> {
        let tables = self.tables.read().unwrap();
        let mut details: Vec<TeacherDetail> = tables
            .teachers
            .iter()
            .filter_map(|t| tables.teacher_detail(t))
            .collect();
        details.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(page(&details, limit, offset))
    }

    async fn find_teacher(&self, id: Uuid) -> StoreResult<Option<TeacherProfile>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.teachers.iter().find(|t| t.id == id).cloned())
    }

    async fn find_teacher_by_user(&self, user_id: Uuid) -> StoreResult<Option<TeacherProfile>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .teachers
            .iter()
            .find(|t| t.user_id == user_id)
            .cloned())
    }

    async fn create_course(&self, course: NewCourse) -> StoreResult<Course> {
        let mut tables = self.tables.write().unwrap();
        let row = Course {
            id: Uuid::new_v4(),
            course_code: course.course_code,
            course_name: course.course_name,
            class_section: course.class_section,
            credits: course.credits,
            teacher_id: course.teacher_id,
        };
        tables.courses.push(row.clone());
        Ok(row)
    }

    async fn list_courses(&self) -> StoreResult<Vec<CourseDetail>> {
        let tables = self.tables.read().unwrap();
        let mut details: Vec<CourseDetail> = tables
            .courses
            .iter()
            .map(|c| tables.course_detail(c))
            .collect();
        details.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        Ok(details)
    }

    async fn courses_by_teacher(&self, teacher_id: Uuid) -> StoreResult<Vec<CourseDetail>> {
        let tables = self.tables.read().unwrap();
        let mut details: Vec<CourseDetail> = tables
            .courses
            .iter()
            .filter(|c| c.teacher_id == Some(teacher_id))
            .map(|c| tables.course_detail(c))
            .collect();
        details.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        Ok(details)
    }

    async fn courses_in_section(&self, class_section: &str) -> StoreResult<Vec<CourseDetail>> {
        let tables = self.tables.read().unwrap();
        let mut details: Vec<CourseDetail> = tables
            .courses
            .iter()
            .filter(|c| c.class_section == class_section)
            .map(|c| tables.course_detail(c))
            .collect();
        details.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        Ok(details)
    }

    async fn find_course(&self, id: Uuid) -> StoreResult<Option<Course>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn upsert_attendance(&self, record: AttendanceUpsert) -> StoreResult<Attendance> {
        let mut tables = self.tables.write().unwrap();
        if let Some(existing) = tables.attendance.iter_mut().find(|a| {
            a.student_id == record.student_id
                && a.course_id == record.course_id
                && a.date == record.date
        }) {
            existing.status = record.status;
            existing.marked_by = record.marked_by;
            existing.remarks = record.remarks;
            return Ok(existing.clone());
        }
        let row = Attendance {
            id: Uuid::new_v4(),
            student_id: record.student_id,
            course_id: record.course_id,
            date: record.date,
            status: record.status,
            marked_by: record.marked_by,
            remarks: record.remarks,
        };
        tables.attendance.push(row.clone());
        Ok(row)
    }

    async fn find_attendance(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Option<Attendance>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .attendance
            .iter()
            .find(|a| a.student_id == student_id && a.course_id == course_id && a.date == date)
            .cloned())
    }

    async fn attendance_for_student(
        &self,
        student_id: Uuid,
    ) -> StoreResult<Vec<StudentAttendanceRow>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<StudentAttendanceRow> = tables
            .attendance
            .iter()
            .filter(|a| a.student_id == student_id)
            .filter_map(|a| {
                let (course_name, course_code) = tables.course_identity(a.course_id)?;
                Some(StudentAttendanceRow {
                    id: a.id,
                    course_id: a.course_id,
                    date: a.date,
                    status: a.status,
                    remarks: a.remarks.clone(),
                    course_name,
                    course_code,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn attendance_for_course(
        &self,
        course_id: Uuid,
        date: Option<NaiveDate>,
    ) -> StoreResult<Vec<CourseAttendanceRow>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<CourseAttendanceRow> = tables
            .attendance
            .iter()
            .filter(|a| a.course_id == course_id && date.is_none_or(|d| a.date == d))
            .filter_map(|a| {
                let (roll_number, full_name) = tables.student_identity(a.student_id)?;
                Some(CourseAttendanceRow {
                    id: a.id,
                    student_id: a.student_id,
                    date: a.date,
                    status: a.status,
                    remarks: a.remarks.clone(),
                    roll_number,
                    full_name,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(a.roll_number.cmp(&b.roll_number)));
        Ok(rows)
    }

    async fn attendance_report(&self, limit: i64) -> StoreResult<Vec<AttendanceReportRow>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<AttendanceReportRow> = tables
            .attendance
            .iter()
            .filter_map(|a| {
                let (roll_number, full_name) = tables.student_identity(a.student_id)?;
                let (course_name, course_code) = tables.course_identity(a.course_id)?;
                Some(AttendanceReportRow {
                    id: a.id,
                    student_id: a.student_id,
                    course_id: a.course_id,
                    date: a.date,
                    status: a.status,
                    roll_number,
                    full_name,
                    course_name,
                    course_code,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn attendance_statuses_for_student(
        &self,
        student_id: Uuid,
    ) -> StoreResult<Vec<AttendanceStatus>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .attendance
            .iter()
            .filter(|a| a.student_id == student_id)
            .map(|a| a.status)
            .collect())
    }

    async fn count_attendance_on(&self, date: NaiveDate) -> StoreResult<i64> {
        let tables = self.tables.read().unwrap();
        Ok(tables.attendance.iter().filter(|a| a.date == date).count() as i64)
    }

    async fn count_attendance_marked_by(
        &self,
        teacher_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<i64> {
        let tables = self.tables.read().unwrap();
        // One register per course per day.
        let courses: HashSet<Uuid> = tables
            .attendance
            .iter()
            .filter(|a| a.marked_by == teacher_id && a.date == date)
            .map(|a| a.course_id)
            .collect();
        Ok(courses.len() as i64)
    }

    async fn create_assignment(&self, assignment: NewAssignment) -> StoreResult<Assignment> {
        let mut tables = self.tables.write().unwrap();
        let row = Assignment {
            id: Uuid::new_v4(),
            course_id: assignment.course_id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date,
            total_marks: assignment.total_marks,
            created_by: assignment.created_by,
            created_at: Utc::now(),
        };
        tables.assignments.push(row.clone());
        Ok(row)
    }

    async fn find_assignment(&self, id: Uuid) -> StoreResult<Option<Assignment>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.assignments.iter().find(|a| a.id == id).cloned())
    }

    async fn list_assignments(&self) -> StoreResult<Vec<AssignmentDetail>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<AssignmentDetail> = tables
            .assignments
            .iter()
            .filter_map(|a| tables.assignment_detail(a))
            .collect();
        rows.sort_by(|a, b| b.due_date.cmp(&a.due_date));
        Ok(rows)
    }

    async fn assignments_by_creator(&self, teacher_id: Uuid) -> StoreResult<Vec<AssignmentDetail>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<AssignmentDetail> = tables
            .assignments
            .iter()
            .filter(|a| a.created_by == teacher_id)
            .filter_map(|a| tables.assignment_detail(a))
            .collect();
        rows.sort_by(|a, b| b.due_date.cmp(&a.due_date));
        Ok(rows)
    }

    async fn assignments_in_section(
        &self,
        class_section: &str,
    ) -> StoreResult<Vec<AssignmentDetail>> {
        let tables = self.tables.read().unwrap();
        let course_ids: Vec<Uuid> = tables
            .courses
            .iter()
            .filter(|c| c.class_section == class_section)
            .map(|c| c.id)
            .collect();
        let mut rows: Vec<AssignmentDetail> = tables
            .assignments
            .iter()
            .filter(|a| course_ids.contains(&a.course_id))
            .filter_map(|a| tables.assignment_detail(a))
            .collect();
        rows.sort_by(|a, b| b.due_date.cmp(&a.due_date));
        Ok(rows)
    }

    async fn count_upcoming_by_creator(
        &self,
        teacher_id: Uuid,
        now: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .assignments
            .iter()
            .filter(|a| a.created_by == teacher_id && a.due_date >= now)
            .count() as i64)
    }

    async fn count_pending_assignments(
        &self,
        student_id: Uuid,
        class_section: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let tables = self.tables.read().unwrap();
        let course_ids: Vec<Uuid> = tables
            .courses
            .iter()
            .filter(|c| c.class_section == class_section)
            .map(|c| c.id)
            .collect();
        let submitted: HashSet<Uuid> = tables
            .submissions
            .iter()
            .filter(|s| s.student_id == student_id)
            .map(|s| s.assignment_id)
            .collect();
        Ok(tables
            .assignments
            .iter()
            .filter(|a| {
                course_ids.contains(&a.course_id)
                    && a.due_date >= now
                    && !submitted.contains(&a.id)
            })
            .count() as i64)
    }

    async fn upsert_submission(&self, submission: SubmissionUpsert) -> StoreResult<Submission> {
        let mut tables = self.tables.write().unwrap();
        if let Some(existing) = tables.submissions.iter_mut().find(|s| {
            s.assignment_id == submission.assignment_id && s.student_id == submission.student_id
        }) {
            existing.submission_text = submission.submission_text;
            existing.file_url = submission.file_url;
            existing.submitted_at = submission.submitted_at;
            return Ok(existing.clone());
        }
        let row = Submission {
            id: Uuid::new_v4(),
            assignment_id: submission.assignment_id,
            student_id: submission.student_id,
            submission_text: submission.submission_text,
            file_url: submission.file_url,
            submitted_at: submission.submitted_at,
            marks_obtained: None,
            feedback: None,
            graded_at: None,
        };
        tables.submissions.push(row.clone());
        Ok(row)
    }

    async fn find_submission(&self, id: Uuid) -> StoreResult<Option<Submission>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn submissions_for_assignment(
        &self,
        assignment_id: Uuid,
    ) -> StoreResult<Vec<SubmissionDetail>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<SubmissionDetail> = tables
            .submissions
            .iter()
            .filter(|s| s.assignment_id == assignment_id)
            .filter_map(|s| {
                let (roll_number, full_name) = tables.student_identity(s.student_id)?;
                Some(SubmissionDetail {
                    id: s.id,
                    assignment_id: s.assignment_id,
                    student_id: s.student_id,
                    submission_text: s.submission_text.clone(),
                    file_url: s.file_url.clone(),
                    submitted_at: s.submitted_at,
                    marks_obtained: s.marks_obtained,
                    feedback: s.feedback.clone(),
                    graded_at: s.graded_at,
                    roll_number,
                    full_name,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.roll_number.cmp(&b.roll_number));
        Ok(rows)
    }

    async fn submissions_by_student(&self, student_id: Uuid) -> StoreResult<Vec<Submission>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .submissions
            .iter()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn grade_submission(
        &self,
        id: Uuid,
        marks_obtained: i32,
        feedback: Option<String>,
        graded_at: DateTime<Utc>,
    ) -> StoreResult<Option<Submission>> {
        let mut tables = self.tables.write().unwrap();
        let Some(submission) = tables.submissions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        submission.marks_obtained = Some(marks_obtained);
        submission.feedback = feedback;
        submission.graded_at.get_or_insert(graded_at);
        Ok(Some(submission.clone()))
    }

    async fn insert_mark(&self, mark: NewMark) -> StoreResult<Mark> {
        let mut tables = self.tables.write().unwrap();
        let row = Mark {
            id: Uuid::new_v4(),
            student_id: mark.student_id,
            course_id: mark.course_id,
            exam_type: mark.exam_type,
            marks_obtained: mark.marks_obtained,
            total_marks: mark.total_marks,
            exam_date: mark.exam_date,
            entered_by: mark.entered_by,
            remarks: mark.remarks,
        };
        tables.marks.push(row.clone());
        Ok(row)
    }

    async fn marks_for_student(&self, student_id: Uuid) -> StoreResult<Vec<MarkWithCourse>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<MarkWithCourse> = tables
            .marks
            .iter()
            .filter(|m| m.student_id == student_id)
            .filter_map(|m| {
                let (course_name, course_code) = tables.course_identity(m.course_id)?;
                Some(MarkWithCourse {
                    id: m.id,
                    course_id: m.course_id,
                    exam_type: m.exam_type.clone(),
                    marks_obtained: m.marks_obtained,
                    total_marks: m.total_marks,
                    exam_date: m.exam_date,
                    remarks: m.remarks.clone(),
                    course_name,
                    course_code,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.exam_date.cmp(&a.exam_date));
        Ok(rows)
    }

    async fn marks_for_course(&self, course_id: Uuid) -> StoreResult<Vec<CourseMarkRow>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<CourseMarkRow> = tables
            .marks
            .iter()
            .filter(|m| m.course_id == course_id)
            .filter_map(|m| {
                let (roll_number, full_name) = tables.student_identity(m.student_id)?;
                Some(CourseMarkRow {
                    id: m.id,
                    student_id: m.student_id,
                    exam_type: m.exam_type.clone(),
                    marks_obtained: m.marks_obtained,
                    total_marks: m.total_marks,
                    exam_date: m.exam_date,
                    remarks: m.remarks.clone(),
                    roll_number,
                    full_name,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.exam_date.cmp(&a.exam_date).then(a.roll_number.cmp(&b.roll_number)));
        Ok(rows)
    }

    async fn recent_marks_for_student(
        &self,
        student_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<Mark>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<Mark> = tables
            .marks
            .iter()
            .filter(|m| m.student_id == student_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.exam_date.cmp(&a.exam_date));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn marks_report(&self, limit: i64) -> StoreResult<Vec<MarkReportRow>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<MarkReportRow> = tables
            .marks
            .iter()
            .filter_map(|m| {
                let (roll_number, full_name) = tables.student_identity(m.student_id)?;
                let (course_name, course_code) = tables.course_identity(m.course_id)?;
                Some(MarkReportRow {
                    id: m.id,
                    student_id: m.student_id,
                    course_id: m.course_id,
                    exam_type: m.exam_type.clone(),
                    marks_obtained: m.marks_obtained,
                    total_marks: m.total_marks,
                    exam_date: m.exam_date,
                    roll_number,
                    full_name,
                    course_name,
                    course_code,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.exam_date.cmp(&a.exam_date));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> StoreResult<Notification> {
        let mut tables = self.tables.write().unwrap();
        let row = Notification {
            id: Uuid::new_v4(),
            title: notification.title,
            message: notification.message,
            created_by: notification.created_by,
            target_role: notification.target_role,
            priority: notification.priority,
            expires_at: notification.expires_at,
            created_at: Utc::now(),
        };
        tables.notifications.push(row.clone());
        Ok(row)
    }

    async fn active_notifications(
        &self,
        role: Role,
        now: DateTime<Utc>,
        limit: i64,
    ) -> StoreResult<Vec<Notification>> {
        let target = match role {
            Role::Admin => TargetRole::Admin,
            Role::Teacher => TargetRole::Teacher,
            Role::Student => TargetRole::Student,
        };
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<Notification> = tables
            .notifications
            .iter()
            .filter(|n| {
                (n.target_role == TargetRole::All || n.target_role == target) && n.expires_at > now
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn list_notifications(&self) -> StoreResult<Vec<Notification>> {
        let tables = self.tables.read().unwrap();
        let mut rows = tables.notifications.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create_feedback(&self, feedback: NewFeedback) -> StoreResult<Feedback> {
        let mut tables = self.tables.write().unwrap();
        let row = Feedback {
            id: Uuid::new_v4(),
            student_id: feedback.student_id,
            course_id: feedback.course_id,
            category: feedback.category,
            message: feedback.message,
            rating: feedback.rating,
            status: "open".to_string(),
            created_at: Utc::now(),
        };
        tables.feedback.push(row.clone());
        Ok(row)
    }

    async fn list_feedback(&self) -> StoreResult<Vec<FeedbackDetail>> {
        let tables = self.tables.read().unwrap();
        let mut rows: Vec<FeedbackDetail> = tables
            .feedback
            .iter()
            .filter_map(|f| {
                let (roll_number, full_name) = tables.student_identity(f.student_id)?;
                Some(FeedbackDetail {
                    id: f.id,
                    student_id: f.student_id,
                    course_id: f.course_id,
                    category: f.category.clone(),
                    message: f.message.clone(),
                    rating: f.rating,
                    status: f.status.clone(),
                    created_at: f.created_at,
                    roll_number,
                    full_name,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn count_students(&self) -> StoreResult<i64> {
        Ok(self.tables.read().unwrap().students.len() as i64)
    }

    async fn count_teachers(&self) -> StoreResult<i64> {
        Ok(self.tables.read().unwrap().teachers.len() as i64)
    }

    async fn count_courses(&self) -> StoreResult<i64> {
        Ok(self.tables.read().unwrap().courses.len() as i64)
    }
}
