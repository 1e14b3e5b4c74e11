//! HTTP transport for the budgeting backend.
//!
//! `Transport` is the narrow wire contract the rest of the engine is
//! written against; `ApiClient` is the production implementation on top
//! of reqwest. Tests substitute a scripted double (see `api::fake`).

use async_trait::async_trait;
use reqwest::{header, Client, Method};
use serde_json::Value;
use tracing::{debug, warn};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Header carrying the per-session authority token.
const AUTHORITY_TOKEN_HEADER: &str = "X-Authority-Token";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Raw request contract against the backend.
///
/// `send` exchanges JSON; `send_binary` fetches an opaque byte blob
/// (document export) and must not advertise a JSON content type.
/// Neither method touches the cache.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, ApiError>;

    async fn send_binary(&self, endpoint: &str) -> Result<Vec<u8>, ApiError>;
}

/// Production transport for the budgeting backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new client for the given API base URL, without a token.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Set the authority token for subsequent requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }

    /// Token header when a token is present. A missing token degrades the
    /// request rather than blocking it.
    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        match self.token {
            Some(ref token) => {
                let value = header::HeaderValue::from_str(token)
                    .map_err(|e| ApiError::InvalidResponse(format!("bad token value: {e}")))?;
                headers.insert(AUTHORITY_TOKEN_HEADER, value);
            }
            None => {
                warn!("No authority token available, sending unauthenticated request");
            }
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        debug!(%method, endpoint, "Sending request");

        let mut request = self
            .client
            .request(method, &url)
            .headers(self.auth_headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let response = Self::check_response(response).await?;

        let text = response.text().await?;
        if text.trim().is_empty() {
            // Some mutation endpoints acknowledge with an empty body.
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{e} in response from {endpoint}")))
    }

    async fn send_binary(&self, endpoint: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.url(endpoint);
        debug!(endpoint, "Fetching binary response");

        // No JSON content header in binary mode; the body is opaque bytes.
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;
        let response = Self::check_response(response).await?;

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Join a base URL and an endpoint path without doubling slashes.
pub(crate) fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h/api", "lists"), "http://h/api/lists");
        assert_eq!(join_url("http://h/api/", "/lists"), "http://h/api/lists");
        assert_eq!(
            join_url("http://h/api", "lists/abc/items"),
            "http://h/api/lists/abc/items"
        );
    }

    #[test]
    fn test_with_token_keeps_base_url() {
        let client = ApiClient::new("http://h/api").expect("client");
        let authed = client.with_token("tok".to_string());
        assert_eq!(authed.url("lists"), "http://h/api/lists");
        assert!(authed.token.is_some());
    }

    #[test]
    fn test_auth_headers_without_token_is_empty() {
        let client = ApiClient::new("http://h/api").expect("client");
        let headers = client.auth_headers().expect("headers");
        assert!(headers.is_empty());
    }

    #[test]
    fn test_auth_headers_with_token() {
        let mut client = ApiClient::new("http://h/api").expect("client");
        client.set_token("abc123".to_string());
        let headers = client.auth_headers().expect("headers");
        assert_eq!(
            headers.get(AUTHORITY_TOKEN_HEADER).map(|v| v.to_str().unwrap()),
            Some("abc123")
        );
    }
}
