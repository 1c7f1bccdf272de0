//! Per-request access token
//!
//! The raw `Authorization` header value is forwarded to the REST backend as
//! its `access_token` header. The gateway never inspects or validates it.

use actix_web::{http::header::AUTHORIZATION, HttpRequest};
use async_graphql::Context;

/// Token taken from the incoming request, attached as GraphQL request data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    /// Read the `Authorization` header verbatim; missing or non-ASCII values yield `None`
    pub fn from_request(req: &HttpRequest) -> Option<Self> {
        req.headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| AccessToken(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Token for the current GraphQL request, if the client sent one
pub fn access_token(ctx: &Context<'_>) -> Option<String> {
    ctx.data_opt::<AccessToken>()
        .map(|token| token.as_str().to_string())
}
