//! Minimal GitHub REST transport shared by the secret store variants.
//!
//! The client is built once with an authenticated token and handed to the
//! stores; they only see typed `get`/`put` calls.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::constants::{DEFAULT_GITHUB_API_URL, GITHUB_ACCEPT, GITHUB_API_VERSION};
use crate::error::{Error, Result};

/// Failure of a single GitHub API call.
#[derive(Error, Debug)]
pub(crate) enum RequestError {
    #[error("GitHub returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl RequestError {
    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Authenticated GitHub API handle.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Zeroizing<String>,
}

impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GithubClient {
    /// Create a client for `base_url` (e.g. `https://api.github.com`).
    ///
    /// # Errors
    ///
    /// Returns `Error::Unexpected` if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("keyturn/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Unexpected(format!("failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            token: Zeroizing::new(token.into()),
        })
    }

    /// Create a client for the public GitHub API.
    pub fn public(token: impl Into<String>) -> Result<Self> {
        Self::new(token, DEFAULT_GITHUB_API_URL)
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    pub(crate) fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("Accept", GITHUB_ACCEPT)
            .header("Authorization", format!("Bearer {}", self.token.as_str()))
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<T, RequestError> {
        debug!(%url, "GET");

        let response = self
            .request(reqwest::Method::GET, url)
            .query(query)
            .send()
            .await?;
        let response = check_status(response).await?;

        let body = response.text().await?;
        trace!(body_len = body.len(), "response received");

        serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> std::result::Result<(), RequestError> {
        debug!(%url, "PUT");

        let response = self
            .request(reqwest::Method::PUT, url)
            .json(body)
            .send()
            .await?;
        check_status(response).await?;

        Ok(())
    }
}

async fn check_status(
    response: reqwest::Response,
) -> std::result::Result<reqwest::Response, RequestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);

    Err(RequestError::Status {
        status: status.as_u16(),
        message,
    })
}
