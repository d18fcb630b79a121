use tracing::instrument;
use uuid::Uuid;

use crate::store::Store;
use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::utils::password::hash_password;

use super::model::{CreateUserDto, NewUser, PaginatedUsersResponse, UpdateUserDto, User, UserPatch};

pub struct UserService;

impl UserService {
    #[instrument(skip(store, dto))]
    pub async fn create_user(store: &dyn Store, dto: CreateUserDto) -> Result<User, AppError> {
        if store.email_exists(&dto.email).await? {
            return Err(AppError::validation("Email already exists"));
        }

        let password_hash = hash_password(&dto.password)?;
        let user = store
            .create_user(NewUser {
                email: dto.email,
                password_hash,
                role: dto.role,
                full_name: dto.full_name,
                phone: dto.phone,
            })
            .await?;

        Ok(user)
    }

    #[instrument(skip(store))]
    pub async fn list_users(
        store: &dyn Store,
        params: PaginationParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = params.limit();
        let offset = params.offset();
        let (data, total) = store.list_users(limit, offset).await?;

        Ok(PaginatedUsersResponse {
            data,
            meta: PaginationMeta::new(total, limit, offset),
        })
    }

    #[instrument(skip(store, dto))]
    pub async fn update_user(
        store: &dyn Store,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let password_hash = match dto.password {
            Some(password) => Some(hash_password(&password)?),
            None => None,
        };

        store
            .update_user(
                id,
                UserPatch {
                    email: dto.email,
                    password_hash,
                    role: dto.role,
                    full_name: dto.full_name,
                    phone: dto.phone,
                    status: dto.status,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    #[instrument(skip(store))]
    pub async fn delete_user(store: &dyn Store, id: Uuid) -> Result<(), AppError> {
        if store.delete_user(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("User not found"))
        }
    }
}
