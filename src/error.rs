//! Error types for the Iamport client

use crate::types::IamportResponse;
use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias for Iamport operations
pub type Result<T> = std::result::Result<T, IamportError>;

/// Message used for HTTP 401 responses
pub const AUTHENTICATION_FAILED: &str = "authentication failed";

/// Message used when no response was received or the status is unrecognized
pub const UNEXPECTED_ERROR: &str = "an unexpected error occurred";

/// Message used when required parameters are absent
pub const MISSING_PARAMETERS: &str = "missing required parameters";

/// Message used when a charge does not come back paid for the requested amount
pub const PAYMENT_VALIDATION_FAILED: &str = "failed to validate payment";

/// Coarse error category callers switch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Provider,
    Authentication,
    Unexpected,
    Config,
}

/// Main error type for Iamport operations
#[derive(Error, Debug)]
pub enum IamportError {
    /// Input rejected before the call, or a charge that failed post-validation
    #[error("Validation error: {message}")]
    Validation { message: String, detail: Value },

    /// The provider reported a business-logic failure
    #[error("Provider error: {message}")]
    Provider {
        message: String,
        response: Box<IamportResponse>,
    },

    /// Credentials rejected (HTTP 401)
    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        response: Box<IamportResponse>,
    },

    /// Transport failure or unrecognized HTTP status
    #[error("Unexpected error: {message}")]
    Unexpected {
        message: String,
        response: Option<Box<IamportResponse>>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Invalid client configuration
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl IamportError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>, detail: Value) -> Self {
        Self::Validation {
            message: message.into(),
            detail,
        }
    }

    /// Create a validation error for a missing parameter set
    pub fn missing_parameters(required: &[&str]) -> Self {
        Self::validation(MISSING_PARAMETERS, json!(required))
    }

    /// Create a provider error
    pub fn provider(message: impl Into<String>, response: IamportResponse) -> Self {
        Self::Provider {
            message: message.into(),
            response: Box::new(response),
        }
    }

    /// Create an authentication error with the fixed message
    pub fn authentication(response: IamportResponse) -> Self {
        Self::Authentication {
            message: AUTHENTICATION_FAILED.to_string(),
            response: Box::new(response),
        }
    }

    /// Create an unexpected error for a response with an unrecognized status
    pub fn unexpected(response: IamportResponse) -> Self {
        Self::Unexpected {
            message: UNEXPECTED_ERROR.to_string(),
            response: Some(Box::new(response)),
            source: None,
        }
    }

    /// Create an unexpected error for a payload that does not have the
    /// expected shape; the normalized response is kept as detail
    pub fn undecodable(response: IamportResponse, err: serde_json::Error) -> Self {
        Self::Unexpected {
            message: format!("Failed to decode payload: {}", err),
            response: Some(Box::new(response)),
            source: None,
        }
    }

    /// Create an unexpected error for a request that never got a response
    pub fn transport(source: reqwest::Error) -> Self {
        Self::Unexpected {
            message: UNEXPECTED_ERROR.to_string(),
            response: None,
            source: Some(source),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Provider { .. } => ErrorKind::Provider,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Unexpected { .. } => ErrorKind::Unexpected,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Human-readable message without the category prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::Provider { message, .. }
            | Self::Authentication { message, .. }
            | Self::Unexpected { message, .. }
            | Self::Config { message } => message,
        }
    }

    /// Normalized response, when the provider answered
    pub fn response(&self) -> Option<&IamportResponse> {
        match self {
            Self::Provider { response, .. } | Self::Authentication { response, .. } => {
                Some(&**response)
            }
            Self::Unexpected { response, .. } => response.as_deref(),
            Self::Validation { .. } | Self::Config { .. } => None,
        }
    }

    /// Detail payload: the normalized response for remote failures, the
    /// required field list or fail reason for validation failures, and an
    /// empty object otherwise
    pub fn detail(&self) -> Value {
        match self {
            Self::Validation { detail, .. } => detail.clone(),
            _ => self
                .response()
                .and_then(|response| serde_json::to_value(response).ok())
                .unwrap_or_else(|| json!({})),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response(status: u16) -> IamportResponse {
        IamportResponse::from_body(
            status,
            json!({ "code": 1, "message": "rejected", "response": null }),
        )
    }

    #[test]
    fn test_missing_parameters_lists_full_set() {
        let error = IamportError::missing_parameters(&["merchant_uid", "amount"]);
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.message(), MISSING_PARAMETERS);
        assert_eq!(error.detail(), json!(["merchant_uid", "amount"]));
        assert!(error.response().is_none());
    }

    #[test]
    fn test_provider_error_detail_is_normalized_response() {
        let error = IamportError::provider("rejected", sample_response(200));
        assert_eq!(error.kind(), ErrorKind::Provider);
        assert_eq!(error.message(), "rejected");

        let detail = error.detail();
        assert_eq!(detail["status"], 200);
        assert_eq!(detail["message"], "rejected");
        assert_eq!(detail["raw"]["code"], 1);
    }

    #[test]
    fn test_authentication_error_uses_fixed_message() {
        let error = IamportError::authentication(sample_response(401));
        assert_eq!(error.kind(), ErrorKind::Authentication);
        assert_eq!(error.message(), AUTHENTICATION_FAILED);
        assert_eq!(error.response().map(|r| r.status), Some(401));
    }

    #[test]
    fn test_unexpected_error_with_response() {
        let error = IamportError::unexpected(sample_response(503));
        assert_eq!(error.kind(), ErrorKind::Unexpected);
        assert_eq!(error.message(), UNEXPECTED_ERROR);
        assert_eq!(error.detail()["status"], 503);
    }

    #[test]
    fn test_config_error_has_empty_detail() {
        let error = IamportError::config("Host cannot be empty");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.detail(), json!({}));
        assert_eq!(error.to_string(), "Configuration error: Host cannot be empty");
    }

    #[test]
    fn test_undecodable_payload_is_unexpected() {
        let err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let error = IamportError::undecodable(sample_response(200), err);
        assert_eq!(error.kind(), ErrorKind::Unexpected);
        assert!(error.message().starts_with("Failed to decode payload"));
        assert_eq!(error.detail()["status"], 200);
    }
}
