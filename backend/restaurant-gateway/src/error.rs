//! REST backend error types

use async_graphql::{ErrorExtensions, Value as GraphQLValue};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestError {
    /// Backend answered with a non-2xx status
    #[error("REST backend responded with status {status}")]
    Status { status: u16, body: Value },

    /// Request never produced a response (connect, DNS, timeout, bad header)
    #[error("REST request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the GraphQL return type
    #[error("unexpected REST response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid REST base URL `{0}`: expected an absolute http(s) URL")]
    InvalidBaseUrl(String),
}

impl RestError {
    /// Body the backend sent along with an error status
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            RestError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            RestError::Status { .. } => "BACKEND_STATUS",
            RestError::Transport(_) => "BACKEND_UNAVAILABLE",
            RestError::Decode(_) => "BAD_BACKEND_RESPONSE",
            RestError::InvalidBaseUrl(_) => "GATEWAY_MISCONFIGURED",
        }
    }
}

impl ErrorExtensions for RestError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            if let Some(status) = self.status() {
                e.set("status", status);
            }
            if let Some(body) = self.response_body() {
                if let Ok(body) = GraphQLValue::from_json(body.clone()) {
                    e.set("response", body);
                }
            }
        })
    }
}
