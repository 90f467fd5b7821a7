//! API client types and trait definitions
//!
//! This module defines the contract for the DirectDNS create endpoint so it
//! can be implemented by both native (reqwest) and WASM (gloo-net) HTTP
//! clients.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default API server
pub const DEFAULT_API_BASE_URL: &str = "https://api.directdns.net";

/// Domain under which every proxy token becomes a subdomain
pub const DEFAULT_PROXY_DOMAIN: &str = "directdns.net";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Network or connection error
    #[error("{0}")]
    Network(String),
    /// Server returned a non-success status
    #[error("Failed to create session")]
    Status { status: u16, body: String },
    /// Failed to parse response
    #[error("{0}")]
    Parse(String),
    /// The request did not complete in time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Body of POST /api/create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub hostname: String,
    /// Always serialized; `null` when no IP was given
    pub ip_address: Option<String>,
}

impl CreateSessionRequest {
    /// Build a request from raw form input. An empty IP means "no IP".
    pub fn from_form(hostname: &str, ip: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            ip_address: if ip.is_empty() {
                None
            } else {
                Some(ip.to_string())
            },
        }
    }
}

/// Response from POST /api/create
///
/// Only `token` is required. The server also reports the bare host it
/// registered and its base domain, which are informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// API endpoint definitions
pub mod endpoints {
    pub const CREATE: &str = "/api/create";
}

/// Trait defining the DirectDNS API
///
/// Implemented by both the native and the WASM HTTP clients. The futures are
/// not required to be `Send` so that browser clients can implement it.
#[allow(async_fn_in_trait)]
pub trait DirectDnsApi {
    /// Register a hostname (and optional IP) and receive a proxy token
    async fn create_session(
        &self,
        req: CreateSessionRequest,
    ) -> Result<CreateSessionResponse, ApiError>;
}

/// Configuration for creating an API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL of the API server (e.g., "https://api.directdns.net")
    pub api_base_url: String,
    /// Domain the proxy subdomains live under (e.g., "directdns.net")
    pub proxy_domain: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            proxy_domain: DEFAULT_PROXY_DOMAIN.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ApiClientConfig {
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_proxy_domain(mut self, domain: impl Into<String>) -> Self {
        self.proxy_domain = domain.into().trim_matches('.').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url, endpoint)
    }

    pub fn create_url(&self) -> String {
        self.url(endpoints::CREATE)
    }

    /// Shareable proxy URL for a token (e.g., "abc123" -> "https://abc123.directdns.net/")
    pub fn proxy_url(&self, token: &str) -> String {
        format!("https://{}.{}/", token, self.proxy_domain)
    }
}
