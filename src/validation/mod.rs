pub mod auth;
pub mod comment;
pub mod deadline;
pub mod project;
pub mod task;
pub mod team;

use axum::{async_trait, extract::FromRequest, http::Request, Json};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that runs `validator` rules before the handler sees it.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(format!("Invalid JSON: {}", rejection)))?;

        value.validate().map_err(first_field_error)?;

        Ok(ValidatedJson(value))
    }
}

/// Reports the first failing field, which is what the form UI highlights.
fn first_field_error(errors: validator::ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    match fields.into_iter().next() {
        Some((field, field_errors)) => {
            let message = field_errors
                .first()
                .and_then(|error| error.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("Validation failed for field: {}", field));
            AppError::field(field.to_string(), message)
        }
        None => AppError::validation("Validation failed"),
    }
}

/// Names are required; whitespace alone does not count.
pub fn validate_required_name(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::field(field, "This field is required."));
    }
    Ok(())
}

pub mod rules {
    use validator::ValidationError;

    /// Password rules applied to every new password: at least 8 characters
    /// and not purely numeric.
    pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
        if password.chars().count() < 8 {
            let mut error = ValidationError::new("password_too_short");
            error.message = Some("This password is too short. It must contain at least 8 characters.".into());
            return Err(error);
        }

        if password.chars().all(|c| c.is_ascii_digit()) {
            let mut error = ValidationError::new("password_entirely_numeric");
            error.message = Some("This password is entirely numeric.".into());
            return Err(error);
        }

        Ok(())
    }

    /// Letters, digits and `@ . + - _` only.
    pub fn validate_username_format(username: &str) -> Result<(), ValidationError> {
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            let mut error = ValidationError::new("invalid_username_format");
            error.message = Some(
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                    .into(),
            );
            return Err(error);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;

    #[test]
    fn password_strength() {
        assert!(validate_password_strength("correct-horse").is_ok());
        assert!(validate_password_strength("short").is_err());
        assert!(validate_password_strength("1234567890").is_err());
    }

    #[test]
    fn username_format() {
        assert!(validate_username_format("jane.doe+work@corp").is_ok());
        assert!(validate_username_format("jane doe").is_err());
        assert!(validate_username_format("jane#doe").is_err());
    }

    #[test]
    fn required_name_rejects_blank() {
        assert!(validate_required_name("name", "Apollo").is_ok());
        let err = validate_required_name("name", "   ").unwrap_err();
        assert_eq!(err.field_name(), Some("name"));
    }
}
