use projectflow::validation::comment::validate_create_comment;

#[test]
fn comment_content_rules() {
    assert!(validate_create_comment("Looks good to me").is_ok());
    assert!(validate_create_comment("").is_err());
    assert!(validate_create_comment("\n\t ").is_err());

    let err = validate_create_comment(&"x".repeat(10_001)).unwrap_err();
    assert_eq!(err.field_name(), Some("content"));
}
