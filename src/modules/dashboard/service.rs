use chrono::Utc;
use tracing::instrument;

use crate::modules::attendance::model::{AttendanceReportRow, AttendanceStatus};
use crate::modules::auth::model::Principal;
use crate::modules::courses::service::resolve_teacher;
use crate::modules::marks::model::MarkReportRow;
use crate::modules::users::model::Role;
use crate::store::Store;
use crate::utils::errors::AppError;
use crate::utils::stats::percentage;

use super::model::{AdminDashboard, StudentDashboard, TeacherDashboard};

const RECENT_MARKS_LIMIT: i64 = 5;
const REPORT_LIMIT: i64 = 100;

/// One dashboard payload per role.
pub enum Dashboard {
    Admin(AdminDashboard),
    Teacher(TeacherDashboard),
    Student(StudentDashboard),
}

pub struct DashboardService;

impl DashboardService {
    /// Builds the acting principal's dashboard. Every value is derived at
    /// read time from the same stored rows the listing endpoints serve.
    #[instrument(skip(store))]
    pub async fn dashboard(
        store: &dyn Store,
        principal: &Principal,
    ) -> Result<Dashboard, AppError> {
        match principal.role {
            Role::Admin => {
                let today = Utc::now().date_naive();
                Ok(Dashboard::Admin(AdminDashboard {
                    total_students: store.count_students().await?,
                    total_teachers: store.count_teachers().await?,
                    total_courses: store.count_courses().await?,
                    today_attendance: store.count_attendance_on(today).await?,
                }))
            }
            Role::Teacher => {
                let teacher = resolve_teacher(store, principal).await?;
                let today = Utc::now().date_naive();
                Ok(Dashboard::Teacher(TeacherDashboard {
                    teacher_id: teacher.id,
                    my_courses: store.courses_by_teacher(teacher.id).await?.len() as i64,
                    today_classes: store.count_attendance_marked_by(teacher.id, today).await?,
                    upcoming_assignments: store
                        .count_upcoming_by_creator(teacher.id, Utc::now())
                        .await?,
                }))
            }
            Role::Student => {
                let profile = store
                    .find_student_by_user(principal.id)
                    .await?
                    .ok_or_else(|| AppError::profile_not_found("Student profile not found"))?;

                let statuses = store.attendance_statuses_for_student(profile.id).await?;
                let total_classes = statuses.len() as i64;
                let present_classes = statuses
                    .iter()
                    .filter(|s| **s == AttendanceStatus::Present)
                    .count() as i64;

                Ok(Dashboard::Student(StudentDashboard {
                    student_id: profile.id,
                    attendance_percentage: percentage(present_classes, total_classes),
                    total_classes,
                    present_classes,
                    pending_assignments: store
                        .count_pending_assignments(
                            profile.id,
                            &profile.class_section,
                            Utc::now(),
                        )
                        .await?,
                    recent_marks: store
                        .recent_marks_for_student(profile.id, RECENT_MARKS_LIMIT)
                        .await?,
                }))
            }
        }
    }

    /// School-wide attendance report for admins, newest first.
    #[instrument(skip(store))]
    pub async fn attendance_report(
        store: &dyn Store,
    ) -> Result<Vec<AttendanceReportRow>, AppError> {
        Ok(store.attendance_report(REPORT_LIMIT).await?)
    }

    /// School-wide marks report for admins, newest first.
    #[instrument(skip(store))]
    pub async fn marks_report(store: &dyn Store) -> Result<Vec<MarkReportRow>, AppError> {
        Ok(store.marks_report(REPORT_LIMIT).await?)
    }
}
