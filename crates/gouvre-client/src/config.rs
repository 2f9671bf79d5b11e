//! Client configuration

use crate::routes::Routes;
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

/// How `POST` bodies of the link endpoints are encoded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyEncoding {
    /// JSON with `Content-Type: application/json`
    #[default]
    Json,
    /// JSON labelled `application/x-www-form-urlencoded`, as older servers
    /// expect
    LegacyForm,
    /// A real `application/x-www-form-urlencoded` body; list fields repeat
    /// their key once per element
    Form,
}

impl BodyEncoding {
    /// `Content-Type` header value for this encoding
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::LegacyForm | Self::Form => "application/x-www-form-urlencoded",
        }
    }
}

/// Which response statuses count as success
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SuccessStatus {
    /// Anything below 400
    #[default]
    BelowClientError,
    /// Exactly 200
    OkOnly,
}

impl SuccessStatus {
    /// Check a response status against this policy
    pub fn accepts(&self, status: StatusCode) -> bool {
        match self {
            Self::BelowClientError => status.as_u16() < 400,
            Self::OkOnly => status == StatusCode::OK,
        }
    }
}

/// Client configuration
#[derive(Clone)]
pub struct Config {
    /// Image server base URL, optionally with a path prefix
    pub endpoint: String,
    /// Bearer token sent with every request
    pub access_token: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// API paths
    pub routes: Routes,
    /// Encoding of link request bodies
    pub body_encoding: BodyEncoding,
    /// Status policy for responses
    pub success_status: SuccessStatus,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            access_token: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: format!("gouvre-client/{}", env!("CARGO_PKG_VERSION")),
            routes: Routes::default(),
            body_encoding: BodyEncoding::default(),
            success_status: SuccessStatus::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("routes", &self.routes)
            .field("body_encoding", &self.body_encoding)
            .field("success_status", &self.success_status)
            .finish()
    }
}

impl Config {
    /// Create a new config with the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Use a different set of API paths
    pub fn with_routes(mut self, routes: Routes) -> Self {
        self.routes = routes;
        self
    }

    /// Choose how link request bodies are encoded
    pub fn with_body_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.body_encoding = encoding;
        self
    }

    /// Choose which statuses count as success
    pub fn with_success_status(mut self, policy: SuccessStatus) -> Self {
        self.success_status = policy;
        self
    }

    /// Build the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.endpoint
    }
}
