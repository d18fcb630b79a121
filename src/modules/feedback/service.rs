use tracing::instrument;

use crate::modules::auth::model::Principal;
use crate::store::Store;
use crate::utils::errors::AppError;

use super::model::{Feedback, FeedbackDetail, NewFeedback, SubmitFeedbackDto};

pub struct FeedbackService;

impl FeedbackService {
    /// Files feedback from the acting student. The student id comes from
    /// the principal, never from the payload.
    #[instrument(skip(store, dto))]
    pub async fn submit_feedback(
        store: &dyn Store,
        principal: &Principal,
        dto: SubmitFeedbackDto,
    ) -> Result<Feedback, AppError> {
        let profile = store
            .find_student_by_user(principal.id)
            .await?
            .ok_or_else(|| AppError::profile_not_found("Student profile not found"))?;

        if let Some(course_id) = dto.course_id
            && store.find_course(course_id).await?.is_none()
        {
            return Err(AppError::not_found("Course not found"));
        }

        let feedback = store
            .create_feedback(NewFeedback {
                student_id: profile.id,
                course_id: dto.course_id,
                category: dto.category,
                message: dto.message,
                rating: dto.rating,
            })
            .await?;

        Ok(feedback)
    }

    #[instrument(skip(store))]
    pub async fn list_feedback(store: &dyn Store) -> Result<Vec<FeedbackDetail>, AppError> {
        Ok(store.list_feedback().await?)
    }
}
