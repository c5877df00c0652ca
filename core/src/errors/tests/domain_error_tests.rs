//! Unit tests for domain error classification

use crate::errors::{AuthError, DomainError, ErrorKind, TokenError};

#[test]
fn test_status_codes_per_kind() {
    assert_eq!(DomainError::validation("All fields are required").status_code(), 400);
    assert_eq!(DomainError::conflict("User already exists").status_code(), 400);
    assert_eq!(DomainError::Auth(AuthError::InvalidCredentials).status_code(), 401);
    assert_eq!(DomainError::not_found("User").status_code(), 404);
    assert_eq!(DomainError::internal("db down").status_code(), 500);
}

#[test]
fn test_token_errors_classify_as_auth_except_generation() {
    assert_eq!(DomainError::from(TokenError::Expired).kind(), ErrorKind::Auth);
    assert_eq!(DomainError::from(TokenError::Invalid).kind(), ErrorKind::Auth);
    assert_eq!(
        DomainError::from(TokenError::GenerationFailed {
            message: "bad key".to_string()
        })
        .kind(),
        ErrorKind::Internal
    );
}

#[test]
fn test_internal_message_is_hidden() {
    let error = DomainError::internal("connection refused at 10.0.0.3:3306");
    assert_eq!(error.public_message(), "Something went wrong");
    assert!(error.to_string().contains("10.0.0.3"));
}

#[test]
fn test_public_messages_for_client_errors() {
    assert_eq!(DomainError::not_found("User").public_message(), "User not found");
    assert_eq!(
        DomainError::Auth(AuthError::SessionSuperseded).public_message(),
        "Refresh token is expired or used"
    );
    assert_eq!(
        DomainError::conflict("User with email or username already exists").public_message(),
        "User with email or username already exists"
    );
}

#[test]
fn test_validation_details() {
    let error = DomainError::invalid_fields(
        "All fields are required",
        vec!["email: is required".to_string()],
    );
    assert_eq!(error.details(), ["email: is required".to_string()]);
    assert!(DomainError::not_found("User").details().is_empty());
}
