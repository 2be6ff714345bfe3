use crate::error::AppError;

pub fn validate_create_comment(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::field("content", "Comment content is required"));
    }

    if content.len() > 10000 {
        return Err(AppError::field(
            "content",
            "Comment content is too long (max 10000 characters)",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_comment_validation() {
        assert!(validate_create_comment("This is a valid comment").is_ok());
        assert!(validate_create_comment("").is_err());
        assert!(validate_create_comment("   ").is_err());
        assert!(validate_create_comment(&"a".repeat(10001)).is_err());
    }
}
