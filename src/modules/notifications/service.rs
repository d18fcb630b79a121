use chrono::Utc;
use tracing::instrument;

use crate::modules::auth::model::Principal;
use crate::modules::users::model::Role;
use crate::store::Store;
use crate::utils::errors::AppError;

use super::model::{CreateNotificationDto, NewNotification, Notification, Priority, TargetRole};

const FEED_LIMIT: i64 = 20;

pub struct NotificationService;

impl NotificationService {
    /// Publishes a notification. Admins target anyone and default to `all`;
    /// teachers default to `student`.
    #[instrument(skip(store, dto))]
    pub async fn create_notification(
        store: &dyn Store,
        principal: &Principal,
        dto: CreateNotificationDto,
    ) -> Result<Notification, AppError> {
        if dto.expires_at <= Utc::now() {
            return Err(AppError::validation("expires_at must be in the future"));
        }

        let default_target = match principal.role {
            Role::Admin => TargetRole::All,
            _ => TargetRole::Student,
        };

        let notification = store
            .create_notification(NewNotification {
                title: dto.title,
                message: dto.message,
                created_by: principal.id,
                target_role: dto.target_role.unwrap_or(default_target),
                priority: dto.priority.unwrap_or(Priority::Medium),
                expires_at: dto.expires_at,
            })
            .await?;

        Ok(notification)
    }

    /// The acting principal's feed: unexpired rows targeted at their role
    /// or at everyone, newest first. Admins see every row, expired
    /// included.
    #[instrument(skip(store))]
    pub async fn list_notifications(
        store: &dyn Store,
        principal: &Principal,
    ) -> Result<Vec<Notification>, AppError> {
        if principal.role == Role::Admin {
            return Ok(store.list_notifications().await?);
        }

        Ok(store
            .active_notifications(principal.role, Utc::now(), FEED_LIMIT)
            .await?)
    }
}
