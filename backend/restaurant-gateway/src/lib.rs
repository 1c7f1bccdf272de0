//! Restaurant Gateway Library
//! Re-exports modules for testing and integration

pub mod clients;
pub mod config;
pub mod error;
pub mod middleware;
pub mod schema;
pub mod server;
