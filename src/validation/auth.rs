use super::validate_required_name;
use crate::db::models::employee::RegisterRequest;
use crate::error::AppError;

pub fn validate_passwords_match(field: &str, first: &str, second: &str) -> Result<(), AppError> {
    if first != second {
        return Err(AppError::field(
            field,
            "The two password fields didn't match.",
        ));
    }
    Ok(())
}

/// Checks that span fields or that the derive rules cannot see, such as a
/// position made of whitespace only.
pub fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    validate_required_name("position", &req.position)?;
    validate_passwords_match("password2", &req.password1, &req.password2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_passwords_are_reported_on_the_confirmation_field() {
        assert!(validate_passwords_match("password2", "same-secret", "same-secret").is_ok());
        let err = validate_passwords_match("password2", "same-secret", "other-secret").unwrap_err();
        assert_eq!(err.field_name(), Some("password2"));
    }
}
