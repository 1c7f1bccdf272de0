//! Restaurant Gateway Middleware

pub mod access_token;

pub use access_token::{access_token, AccessToken};
