use crate::AppState;
use crate::config::AuthConfig;
use crate::db::models::employee::{AuthEmployee, Employee};
use crate::db::repositories::employees::EmployeeRepo;
use crate::error::{AppError, AppResult};
use axum::{
    TypedHeader,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use headers::Authorization;
use headers::authorization::Bearer;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // employee id
    pub username: String,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expires_in: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expires_in: config.access_token_expires_in,
        }
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn generate_access_token(&self, employee_id: i32, username: &str) -> AppResult<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::internal(format!("System clock error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: employee_id,
            username: username.to_string(),
            exp: now + self.expires_in,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Resolves the bearer token to an active employee and stores it in the
/// request extensions as [`AuthEmployee`].
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) =
        bearer.ok_or_else(|| AppError::auth("Authentication required"))?;

    let claims = state
        .tokens
        .verify_token(bearer.token())
        .map_err(|_| AppError::auth("Invalid or expired access token"))?;

    let mut conn = state.db.get()?;
    let employee: Employee = EmployeeRepo::find_active_by_id(&mut conn, claims.sub)?
        .ok_or_else(|| AppError::auth("Employee not found or inactive"))?;
    drop(conn);

    request.extensions_mut().insert(AuthEmployee {
        id: employee.id,
        username: employee.username,
        email: employee.email,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: "test-secret-value".to_string(),
            access_token_expires_in: 600,
            password_reset_expires_in: 600,
            bcrypt_cost: 4,
        })
    }

    #[test]
    fn issued_token_verifies() {
        let tokens = service();
        let token = tokens.generate_access_token(42, "alice").unwrap();
        let claims = tokens.verify_token(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = service().generate_access_token(1, "bob").unwrap();
        let other = TokenService::new(&AuthConfig {
            jwt_secret: "different-secret".to_string(),
            access_token_expires_in: 600,
            password_reset_expires_in: 600,
            bcrypt_cost: 4,
        });
        assert!(other.verify_token(&token).is_err());
    }
}
