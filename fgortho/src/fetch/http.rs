//! HTTP transport.
//!
//! A minimal async GET abstraction so tile fetching can run against canned
//! responses in tests. [`ReqwestFetch`] is the production implementation.

use std::future::Future;
use std::time::Duration;

use super::FetchError;

/// Request timeout for tile downloads.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Browser-style user agent. Some WMS endpoints reject the default
/// reqwest agent string.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// One buffered HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Raw `Content-Type` header, if present.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Vec<u8>,
}

/// Async HTTP GET.
pub trait HttpFetch: Send + Sync {
    /// Performs a GET request and buffers the response.
    ///
    /// Transport failures (failed connect, timeout, interrupted body) map
    /// to [`FetchError::Request`]. Any HTTP status comes back as a
    /// response, leaving status policy to the caller.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: reqwest::Client,
}

impl ReqwestFetch {
    /// Creates a transport with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpFetch for ReqwestFetch {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
