//! Error messages and payloads exposed to callers

use iamport::error::{AUTHENTICATION_FAILED, MISSING_PARAMETERS, UNEXPECTED_ERROR};
use iamport::{ClientConfig, ErrorKind, Iamport, IamportError, IamportResponse};
use serde_json::json;

fn provider_response(status: u16) -> IamportResponse {
    IamportResponse::from_body(
        status,
        json!({ "code": -1, "message": "already cancelled", "response": null }),
    )
}

#[test]
fn test_validation_error_message() {
    let error = IamportError::missing_parameters(&["merchant_uid", "amount"]);

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("Validation error"),
        "Error message MUST contain 'Validation error' - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains(MISSING_PARAMETERS),
        "Error message MUST contain the missing-parameter reason - actual: {}",
        error_msg
    );
}

#[test]
fn test_provider_error_message() {
    let error = IamportError::provider("already cancelled", provider_response(400));

    let error_msg = error.to_string();
    assert!(
        error_msg.contains("Provider error"),
        "Error message MUST contain 'Provider error' - actual: {}",
        error_msg
    );
    assert!(
        error_msg.contains("already cancelled"),
        "Error message MUST contain the provider message - actual: {}",
        error_msg
    );
}

#[test]
fn test_authentication_error_message() {
    let error = IamportError::authentication(provider_response(401));

    assert_eq!(error.kind(), ErrorKind::Authentication);
    assert_eq!(
        error.to_string(),
        format!("Authentication error: {}", AUTHENTICATION_FAILED)
    );
    // The provider's own text is kept in the detail, not the message
    assert_eq!(error.detail()["message"], "already cancelled");
}

#[test]
fn test_unexpected_error_message() {
    let error = IamportError::unexpected(provider_response(502));

    assert_eq!(error.kind(), ErrorKind::Unexpected);
    assert_eq!(error.message(), UNEXPECTED_ERROR);
    assert_eq!(error.detail()["status"], 502);
}

#[test]
fn test_error_kinds_are_distinct() {
    let kinds = [
        IamportError::validation("x", json!(null)).kind(),
        IamportError::provider("x", provider_response(400)).kind(),
        IamportError::authentication(provider_response(401)).kind(),
        IamportError::unexpected(provider_response(500)).kind(),
        IamportError::config("x").kind(),
    ];

    for (i, a) in kinds.iter().enumerate() {
        for b in kinds.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_invalid_host_is_config_error() {
    let error = Iamport::new(ClientConfig::default().with_host("not a url")).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Config);
    assert!(
        error.to_string().contains("Configuration error"),
        "Error message MUST contain 'Configuration error' - actual: {}",
        error
    );
}

#[test]
fn test_errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<IamportError>();
    assert_send_sync::<Iamport>();
}
