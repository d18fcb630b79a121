use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::{Role, User};
use crate::utils::errors::AppError;

/// Session token claims. Carries everything the access-control layer needs
/// so no database round trip is required to authenticate a request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub role: String,
    pub full_name: String,
    pub exp: usize,
    pub iat: usize,
}

/// The authenticated identity attached to a request. Immutable for the
/// request's duration; derived only from a validated token.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
    pub full_name: String,
}

impl Principal {
    pub fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::invalid_token("Invalid subject in token"))?;
        let role = Role::parse(&claims.role)
            .ok_or_else(|| AppError::invalid_token("Invalid role in token"))?;

        Ok(Principal {
            id,
            role,
            full_name: claims.full_name.clone(),
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_from_valid_claims() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            role: "student".to_string(),
            full_name: "Sam Student".to_string(),
            exp: 9999999999,
            iat: 0,
        };

        let principal = Principal::from_claims(&claims).unwrap();
        assert_eq!(principal.id, id);
        assert_eq!(principal.role, Role::Student);
        assert_eq!(principal.full_name, "Sam Student");
    }

    #[test]
    fn test_principal_rejects_bad_subject() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            role: "student".to_string(),
            full_name: String::new(),
            exp: 0,
            iat: 0,
        };
        assert!(matches!(
            Principal::from_claims(&claims),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_principal_rejects_unknown_role() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: "superuser".to_string(),
            full_name: String::new(),
            exp: 0,
            iat: 0,
        };
        assert!(matches!(
            Principal::from_claims(&claims),
            Err(AppError::InvalidToken(_))
        ));
    }
}
