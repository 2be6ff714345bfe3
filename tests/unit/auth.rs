use projectflow::{
    config::AuthConfig,
    db::models::employee::RegisterRequest,
    middleware::auth::TokenService,
    validation::{
        auth::{validate_passwords_match, validate_registration},
        rules::validate_password_strength,
    },
};
use validator::Validate;

fn register(username: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        position: "Developer".to_string(),
        password1: password.to_string(),
        password2: password.to_string(),
    }
}

#[test]
fn register_request_validation() {
    assert!(register("alice", "alice@example.com", "s3cure-pass").validate().is_ok());
    assert!(register("al", "alice@example.com", "s3cure-pass").validate().is_err());
    assert!(register("al ice", "alice@example.com", "s3cure-pass").validate().is_err());
    assert!(register("alice", "not-an-email", "s3cure-pass").validate().is_err());
    assert!(register("alice", "alice@example.com", "12345678901").validate().is_err());
    assert!(register("alice", "alice@example.com", "short").validate().is_err());
}

#[test]
fn whitespace_position_is_rejected() {
    let mut request = register("alice", "alice@example.com", "s3cure-pass");
    assert!(validate_registration(&request).is_ok());

    request.position = "   ".to_string();
    assert!(request.validate().is_ok());
    let err = validate_registration(&request).unwrap_err();
    assert_eq!(err.field_name(), Some("position"));

    let mut request = register("alice", "alice@example.com", "s3cure-pass");
    request.password2 = "other-pass".to_string();
    assert_eq!(validate_registration(&request).unwrap_err().field_name(), Some("password2"));
}

#[test]
fn password_rules() {
    assert!(validate_password_strength("longenough").is_ok());
    assert!(validate_password_strength("9876543210").is_err());
    assert!(validate_passwords_match("password2", "a-password", "b-password").is_err());
}

#[test]
fn access_token_carries_the_employee_id() {
    let tokens = TokenService::new(&AuthConfig {
        jwt_secret: "integration-secret".to_string(),
        access_token_expires_in: 3600,
        password_reset_expires_in: 3600,
        bcrypt_cost: 4,
    });
    let token = tokens.generate_access_token(7, "carol").unwrap();
    let claims = tokens.verify_token(&token).unwrap();
    assert_eq!(claims.sub, 7);
    assert_eq!(tokens.expires_in(), 3600);
    assert!(tokens.verify_token("not.a.token").is_err());
}
