use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::modules::users::model::{Role, User};
use crate::utils::errors::AppError;

/// Issues a signed session token carrying the user's id, role, and display
/// name. Nothing else goes into the token; handlers that need a fresh
/// profile row fetch it themselves.
pub fn create_access_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role.as_str().to_string(),
        full_name: user.full_name.clone(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::storage(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::invalid_token("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::model::UserStatus;
    use uuid::Uuid;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "jane@school.test".to_string(),
            role: Role::Teacher,
            full_name: "Jane Doe".to_string(),
            phone: None,
            status: UserStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let config = test_config();
        let user = test_user();

        let token = create_access_token(&user, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, "teacher");
        assert_eq!(claims.full_name, "Jane Doe");
    }

    #[test]
    fn test_garbled_token_rejected() {
        let config = test_config();
        let err = verify_token("not-a-jwt", &config).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken(_)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = test_config();
        let other = JwtConfig {
            secret: "a-different-secret".to_string(),
            access_token_expiry: 3600,
        };

        let token = create_access_token(&test_user(), &config).unwrap();
        assert!(verify_token(&token, &other).is_err());
    }
}
