//! Iamport API client: token cache and request executor

use crate::error::IamportError;
use crate::types::{AccessToken, ClientConfig, IamportResponse};
use crate::validation::{into_params, require_params};
use crate::Result;
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, trace};

/// `User-Agent` sent with every request
pub const USER_AGENT: &str = concat!("iamport-rs/", env!("CARGO_PKG_VERSION"));

/// Characters left as-is inside a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one path parameter
pub(crate) fn segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// One outgoing call
#[derive(Debug, Clone)]
pub(crate) struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Map a received response onto the success/failure contract.
///
/// 2xx succeeds only with envelope `code == 0`. 404 always succeeds and
/// leaves absence detection to the caller.
pub(crate) fn classify(response: IamportResponse) -> Result<IamportResponse> {
    let status = response.status;

    if (200..300).contains(&status) {
        return match response.code() {
            Some(0) => Ok(response),
            _ => {
                let message = response.message.clone().unwrap_or_default();
                Err(IamportError::provider(message, response))
            }
        };
    }

    match status {
        400 => {
            let message = response.message.clone().unwrap_or_default();
            Err(IamportError::provider(message, response))
        }
        401 => Err(IamportError::authentication(response)),
        404 => Ok(response),
        _ => Err(IamportError::unexpected(response)),
    }
}

/// Client for the Iamport REST API.
///
/// Cloning is cheap; clones share the HTTP connection pool and the cached
/// access token.
#[derive(Clone)]
pub struct Iamport {
    config: Arc<ClientConfig>,
    client: Client,
    token: Arc<RwLock<Option<AccessToken>>>,
    refresh: Arc<Mutex<()>>,
}

impl std::fmt::Debug for Iamport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iamport")
            .field("config", &self.config)
            .field("token", &"<cached>")
            .finish()
    }
}

impl Iamport {
    /// Create a client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| IamportError::config(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_client(config, client)
    }

    /// Create a client around an existing `reqwest::Client`.
    ///
    /// The configuration is validated the same way as in [`new`](Self::new).
    /// The caller's client keeps its own timeout and user agent settings;
    /// the `User-Agent` header is still set per request.
    pub fn with_client(config: ClientConfig, client: Client) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            client,
            token: Arc::new(RwLock::new(None)),
            refresh: Arc::new(Mutex::new(())),
        })
    }

    /// Create a client from `IAMPORT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base host URL
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// True if no token was obtained yet or the cached one has expired
    pub async fn is_expired_token(&self) -> bool {
        self.token
            .read()
            .await
            .as_ref()
            .map_or(true, AccessToken::is_expired)
    }

    /// Currently cached token, expired or not
    pub async fn access_token(&self) -> Option<AccessToken> {
        self.token.read().await.clone()
    }

    /// Replace the cached token
    pub async fn set_access_token(&self, token: AccessToken) {
        *self.token.write().await = Some(token);
    }

    /// Drop the cached token so the next call exchanges credentials again
    pub async fn clear_access_token(&self) {
        *self.token.write().await = None;
    }

    async fn valid_token(&self) -> Option<String> {
        self.token
            .read()
            .await
            .as_ref()
            .filter(|token| !token.is_expired())
            .map(|token| token.access_token.clone())
    }

    /// Return a valid token, exchanging credentials first if necessary
    pub async fn ensure_token(&self) -> Result<String> {
        if let Some(token) = self.valid_token().await {
            trace!("using cached access token");
            return Ok(token);
        }

        let _gate = self.refresh.lock().await;

        // Another caller may have refreshed while we waited for the gate
        if let Some(token) = self.valid_token().await {
            trace!("access token refreshed concurrently");
            return Ok(token);
        }

        let response = self.get_token().await?;
        let token: AccessToken = response.data_as()?;
        debug!(expired_at = token.expired_at, "access token refreshed");

        let value = token.access_token.clone();
        *self.token.write().await = Some(token);
        Ok(value)
    }

    /// Exchange the configured key and secret for an access token.
    ///
    /// `POST /users/getToken`. The token is returned but not cached; use
    /// [`ensure_token`](Self::ensure_token) for that.
    pub async fn get_token(&self) -> Result<IamportResponse> {
        self.get_token_with(&self.config.api_key, &self.config.secret)
            .await
    }

    /// Exchange explicit credentials for an access token
    pub async fn get_token_with(&self, api_key: &str, secret: &str) -> Result<IamportResponse> {
        let params = into_params(json!({
            "imp_key": api_key,
            "imp_secret": secret,
        }))?;
        require_params(&params, &["imp_key", "imp_secret"])?;

        self.request(RequestSpec::post("/users/getToken").with_body(params))
            .await
    }

    /// Refresh the token if needed, then execute the request
    pub(crate) async fn authorized(&self, spec: RequestSpec) -> Result<IamportResponse> {
        self.ensure_token().await?;
        self.request(spec).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.host.trim_end_matches('/'), path)
    }

    /// Execute one request and normalize the outcome.
    ///
    /// The `Authorization` header is attached only if the cached token is
    /// still valid; this does not refresh it.
    pub(crate) async fn request(&self, spec: RequestSpec) -> Result<IamportResponse> {
        let mut builder = self
            .client
            .request(spec.method.clone(), self.url(&spec.path))
            .header(reqwest::header::USER_AGENT, USER_AGENT);

        if let Some(token) = self.valid_token().await {
            builder = builder.header(reqwest::header::AUTHORIZATION, token);
        }

        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }

        if let Some(body) = &spec.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(method = %spec.method, path = %spec.path, error = %e, "request failed without response");
                return Err(IamportError::transport(e));
            }
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!(method = %spec.method, path = %spec.path, status, error = %e, "failed to read response body");
                return Err(IamportError::transport(e));
            }
        };

        debug!(method = %spec.method, path = %spec.path, status, "request completed");

        let result = classify(IamportResponse::from_text(status, &text));
        if let Err(e) = &result {
            debug!(kind = ?e.kind(), reason = e.message(), "request rejected");
        }
        result
    }
}
