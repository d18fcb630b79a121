use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Principal;
use crate::modules::users::model::User;
use crate::store::Store;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::{LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    /// Verifies credentials and issues a session token. Unknown emails,
    /// wrong passwords, and inactive accounts all produce the same error.
    #[instrument(skip(store, dto))]
    pub async fn login(
        store: &dyn Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let row = store
            .find_user_for_login(&dto.email)
            .await?
            .ok_or_else(|| AppError::unauthenticated("Invalid email or password"))?;

        if !verify_password(&dto.password, &row.password_hash)? {
            return Err(AppError::unauthenticated("Invalid email or password"));
        }

        let access_token = create_access_token(&row.user, jwt_config)?;

        Ok(LoginResponse {
            access_token,
            user: row.user,
        })
    }

    /// The current account behind the presented token.
    #[instrument(skip(store))]
    pub async fn current_user(store: &dyn Store, principal: &Principal) -> Result<User, AppError> {
        store
            .find_user(principal.id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
