//! REST backend client
//!
//! Every resolver describes its backend call as a [`RestRequest`] and hands it
//! to a [`RestClient`]. The schema holds the client as `Arc<dyn RestClient>`,
//! so tests can swap the reqwest implementation for a recording mock.
//!
//! # Response handling:
//! - **2xx**: body parsed as JSON; empty body is `null`, non-JSON text is a JSON string
//! - **other status**: [`RestError::Status`] carrying the decoded body
//! - **no response**: [`RestError::Transport`]

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::config::BackendConfig;
use crate::error::RestError;

/// One outbound call to the REST backend
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: Method,
    /// Path relative to the backend base URL, starting with `/`
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl RestRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).json(body)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, path).json(body)
    }

    /// Add a query parameter; `None` leaves it out
    pub fn query(mut self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.query.push((name, value.into()));
        }
        self
    }

    /// Add a header; `None` leaves it out
    pub fn header(mut self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.headers.push((name, value.into()));
        }
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Build a path from literal parts and caller-supplied identifiers
///
/// Each identifier is percent-encoded so it stays a single path segment.
pub fn resource_path(prefix: &str, id: &str, suffix: Option<&str>) -> String {
    let mut path = format!("{}/{}", prefix, urlencoding::encode(id));
    if let Some(suffix) = suffix {
        path.push('/');
        path.push_str(suffix);
    }
    path
}

#[async_trait]
pub trait RestClient: Send + Sync {
    async fn send(&self, request: RestRequest) -> Result<Value, RestError>;
}

pub type SharedRestClient = Arc<dyn RestClient>;

/// reqwest-backed [`RestClient`]
///
/// Uses reqwest's default connection pool. No timeout is set unless
/// [`BackendConfig::timeout`] is configured.
#[derive(Clone)]
pub struct HttpRestClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRestClient {
    pub fn new(config: &BackendConfig) -> Result<Self, RestError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RestError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn into_shared(self) -> SharedRestClient {
        Arc::new(self)
    }
}

#[async_trait]
impl RestClient for HttpRestClient {
    async fn send(&self, request: RestRequest) -> Result<Value, RestError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, url = %url, "Calling REST backend");

        let mut builder = self.http.request(request.method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(&text);

        if status.is_success() {
            Ok(body)
        } else {
            Err(RestError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
