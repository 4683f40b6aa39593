//! HTTP transport for a single GraphQL endpoint.

use crate::{ClientError, Result};
use std::time::Duration;

/// Default timeout for a request (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where requests go and how they authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    bearer: Option<String>,
}

impl Endpoint {
    /// Creates an endpoint from a host or URL.
    ///
    /// A host without a scheme is assumed to be served over `https`. An empty
    /// bearer token is treated as no token.
    ///
    /// ```
    /// # use gql_client::Endpoint;
    /// let endpoint = Endpoint::new("api.example.com/graphql", None);
    /// assert_eq!(endpoint.url(), "https://api.example.com/graphql");
    /// ```
    #[must_use]
    pub fn new(host: &str, bearer: Option<String>) -> Self {
        let host = host.trim();
        let url = if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };
        Self {
            url,
            bearer: bearer.filter(|token| !token.is_empty()),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }
}

/// Status and body of a response, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends JSON bodies to an [`Endpoint`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpTransport {
    pub fn new(endpoint: Endpoint) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// POSTs `body` as JSON and returns the response without interpreting it.
    ///
    /// Any HTTP status is returned as-is; only failures to complete the exchange
    /// are errors. There is no retry.
    #[tracing::instrument(skip(self, body), fields(url = %self.endpoint.url))]
    pub async fn post(&self, body: &serde_json::Value) -> Result<RawResponse> {
        let mut request = self
            .client
            .post(&self.endpoint.url)
            .header("Content-Type", "application/json");

        if let Some(token) = &self.endpoint.bearer {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        tracing::debug!(authenticated = self.endpoint.bearer.is_some(), "Sending request");
        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        tracing::debug!(status, "Received response");

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
