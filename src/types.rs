//! Core types for the Iamport client

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Production API host
pub const DEFAULT_HOST: &str = "https://api.iamport.kr";

/// Public test API key published by Iamport
pub const TEST_API_KEY: &str = "imp_apiKey";

/// Public test API secret published by Iamport
pub const TEST_API_SECRET: &str =
    "ekKoeW8RyKuT0zgaZsUtXXTLQ4AhPFW3ZGseDA6bkA5lamv9OqDMnxyeB9wqOsuO9W3Mx9YSJ4dTqJ3f";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an [`Iamport`](crate::Iamport) client
#[derive(Clone)]
pub struct ClientConfig {
    /// REST API key (`imp_key`)
    pub api_key: String,
    /// REST API secret (`imp_secret`)
    pub secret: String,
    /// Base URL of the API
    pub host: String,
    /// Request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .field("host", &self.host)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Create a config with explicit credentials against the production host
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
            host: DEFAULT_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a config from `IAMPORT_API_KEY`, `IAMPORT_API_SECRET` and
    /// `IAMPORT_HOST`, falling back to the defaults for unset variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        Self {
            api_key: env::var("IAMPORT_API_KEY").unwrap_or(defaults.api_key),
            secret: env::var("IAMPORT_API_SECRET").unwrap_or(defaults.secret),
            host: env::var("IAMPORT_HOST").unwrap_or(defaults.host),
            timeout: defaults.timeout,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the API secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = secret.into();
        self
    }

    /// Set the base host URL
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the client configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.api_key.is_empty() {
            return Err(crate::IamportError::config("API key cannot be empty"));
        }

        if self.secret.is_empty() {
            return Err(crate::IamportError::config("API secret cannot be empty"));
        }

        if self.host.is_empty() {
            return Err(crate::IamportError::config("Host cannot be empty"));
        }

        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err(crate::IamportError::config(
                "Host must start with http:// or https://",
            ));
        }

        url::Url::parse(&self.host)
            .map_err(|e| crate::IamportError::config(format!("Invalid host URL: {}", e)))?;

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(TEST_API_KEY, TEST_API_SECRET)
    }
}

/// Response envelope every Iamport endpoint wraps its payload in
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// `0` on success, anything else is a provider-side failure
    #[serde(default)]
    pub code: Option<i64>,
    /// Human-readable message, usually `null` on success
    #[serde(default)]
    pub message: Option<String>,
    /// Endpoint payload
    #[serde(default)]
    pub response: Value,
}

/// Normalized outcome of one API call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IamportResponse {
    /// HTTP status code
    pub status: u16,
    /// Envelope message
    pub message: Option<String>,
    /// Envelope `response` field
    pub data: Value,
    /// Full response body
    pub raw: Value,
}

impl IamportResponse {
    /// Build a normalized response from a status code and a decoded body
    pub fn from_body(status: u16, raw: Value) -> Self {
        let message = raw
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let data = raw.get("response").cloned().unwrap_or(Value::Null);

        Self {
            status,
            message,
            data,
            raw,
        }
    }

    /// Build a normalized response from undecoded body text
    pub fn from_text(status: u16, text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(raw) => Self::from_body(status, raw),
            Err(_) if text.is_empty() => Self::from_body(status, Value::Null),
            Err(_) => Self::from_body(status, Value::String(text.to_string())),
        }
    }

    /// Decode the raw body as the provider envelope; a body that is not an
    /// envelope yields the empty default
    pub fn envelope(&self) -> Envelope {
        Envelope::deserialize(&self.raw).unwrap_or_default()
    }

    /// Envelope `code`, if present
    pub fn code(&self) -> Option<i64> {
        self.envelope().code
    }

    /// True when the payload is empty, which is how a 404 lookup reports absence
    pub fn is_empty(&self) -> bool {
        self.data.is_null()
    }

    /// Deserialize the payload into a concrete type
    pub fn data_as<T>(&self) -> crate::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        T::deserialize(&self.data)
            .map_err(|e| crate::IamportError::undecodable(self.clone(), e))
    }
}

/// Bearer token issued by `/users/getToken`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Token value sent in the `Authorization` header
    pub access_token: String,
    /// Expiry as Unix seconds
    pub expired_at: i64,
    /// Provider clock at issuance
    #[serde(default)]
    pub now: i64,
}

impl AccessToken {
    /// Create a token expiring at `expired_at`
    pub fn new(access_token: impl Into<String>, expired_at: i64) -> Self {
        Self {
            access_token: access_token.into(),
            expired_at,
            now: 0,
        }
    }

    /// True once `now` has reached the expiry timestamp
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expired_at <= now
    }

    /// Check expiry against the system clock
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}

/// Payment status filter for list endpoints
pub mod payment_status {
    pub const ALL: &str = "all";
    pub const READY: &str = "ready";
    pub const PAID: &str = "paid";
    pub const CANCELLED: &str = "cancelled";
    pub const FAILED: &str = "failed";
}

/// Query filters for `/payments/status/{status}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusFilters {
    /// Page number, 1-based
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Lower bound, Unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    /// Upper bound, Unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    /// Sort order, e.g. `-started` or `paid`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting: Option<String>,
}

impl StatusFilters {
    /// Create empty filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Restrict to a time range
    pub fn with_range(mut self, from: i64, to: i64) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Set sort order
    pub fn with_sorting(mut self, sorting: impl Into<String>) -> Self {
        self.sorting = Some(sorting.into());
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(from) = self.from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            query.push(("to", to.to_string()));
        }
        if let Some(sorting) = &self.sorting {
            query.push(("sorting", sorting.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_key, TEST_API_KEY);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::default().with_host("api.iamport.kr");
        assert!(config.validate().is_err());

        let config = ClientConfig::default().with_host("");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("", "secret");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("key", "");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("key", "secret").with_host("http://localhost:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_debug_hides_secret() {
        let config = ClientConfig::new("key", "super-secret");
        let debug = format!("{:?}", config);
        assert!(debug.contains("key"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_normalize_envelope() {
        let body = json!({
            "code": 0,
            "message": null,
            "response": { "imp_uid": "imp_1", "amount": 1000 }
        });
        let response = IamportResponse::from_body(200, body.clone());

        assert_eq!(response.status, 200);
        assert_eq!(response.message, None);
        assert_eq!(response.data, body["response"]);
        assert_eq!(response.raw, body);
        assert_eq!(response.code(), Some(0));
        assert!(!response.is_empty());
    }

    #[test]
    fn test_normalize_non_json_body() {
        let response = IamportResponse::from_text(502, "Bad Gateway");
        assert_eq!(response.raw, json!("Bad Gateway"));
        assert!(response.data.is_null());
        assert_eq!(response.message, None);
        assert_eq!(response.code(), None);

        let response = IamportResponse::from_text(500, "");
        assert!(response.raw.is_null());
    }

    #[test]
    fn test_envelope_decoding() {
        let response = IamportResponse::from_body(
            200,
            json!({ "code": -1, "message": "no such payment", "response": null }),
        );
        let envelope = response.envelope();
        assert_eq!(envelope.code, Some(-1));
        assert_eq!(envelope.message.as_deref(), Some("no such payment"));
    }

    #[test]
    fn test_access_token_expiry() {
        let token = AccessToken::new("tok", 1_000);
        assert!(!token.is_expired_at(999));
        assert!(token.is_expired_at(1_000));
        assert!(token.is_expired_at(1_001));
    }

    #[test]
    fn test_status_filters_query() {
        let filters = StatusFilters::new()
            .with_page(2)
            .with_limit(20)
            .with_range(100, 200);

        assert_eq!(
            filters.to_query(),
            vec![
                ("page", "2".to_string()),
                ("limit", "20".to_string()),
                ("from", "100".to_string()),
                ("to", "200".to_string()),
            ]
        );
        assert!(StatusFilters::new().to_query().is_empty());
    }
}
