//! Configuration for the Restaurant Gateway
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (skipped when `APP_ENV=production`)

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// REST backend configuration
    pub backend: BackendConfig,

    /// GraphQL configuration
    pub graphql: GraphQLConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL every REST path is appended to, without a trailing slash
    pub base_url: String,
    /// Per-request timeout; `None` waits on the backend indefinitely
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLConfig {
    /// Serve GraphiQL on GET
    pub playground: bool,
    /// Enable introspection
    pub introspection: bool,
    /// Max query depth
    pub max_depth: usize,
    /// Max query complexity
    pub max_complexity: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: None,
        }
    }
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            playground: true,
            introspection: true,
            max_depth: 10,
            max_complexity: 1000,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Outside production a `.env` file in the working directory is read first;
    /// variables already present in the environment win over the file.
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        if app_env != "production" {
            match dotenvy::dotenv() {
                Ok(path) => info!(path = %path.display(), "Loaded .env file"),
                Err(_) => info!("No .env file found, using process environment"),
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let graphql_defaults = GraphQLConfig::default();

        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(4000),
            },
            backend: BackendConfig {
                base_url: lookup("REST_API_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| BackendConfig::default().base_url),
                timeout: lookup("REST_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .map(Duration::from_secs),
            },
            graphql: GraphQLConfig {
                playground: lookup("GRAPHQL_PLAYGROUND")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(graphql_defaults.playground),
                introspection: lookup("GRAPHQL_INTROSPECTION")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(graphql_defaults.introspection),
                max_depth: lookup("GRAPHQL_MAX_DEPTH")
                    .and_then(|d| d.parse().ok())
                    .unwrap_or(graphql_defaults.max_depth),
                max_complexity: lookup("GRAPHQL_MAX_COMPLEXITY")
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(graphql_defaults.max_complexity),
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
