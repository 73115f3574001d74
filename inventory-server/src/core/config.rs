//! Server configuration

use crate::auth::{CookieConfig, JwtConfig};

/// Gateway configuration
///
/// # Environment variables
///
/// Every item can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP service port |
/// | BACKEND_API_URL | http://localhost:4000 | inventory backend base URL |
/// | BACKEND_API_TOKEN | (none) | bearer credential for backend calls |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | tracing level filter |
/// | LOG_DIR | (none) | daily log file directory |
/// | COOKIE_SECURE | true outside development | Secure flag on session cookies |
/// | JWT_SECRET | (required in production) | credential signing secret |
/// | JWT_EXPIRATION_MINUTES | 480 | credential lifetime |
///
/// # Example
///
/// ```ignore
/// BACKEND_API_URL=https://inventory.internal HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Base URL of the inventory backend REST API
    pub backend_api_url: String,
    /// Service credential sent as a bearer token on every backend call
    pub backend_api_token: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log level filter
    pub log_level: String,
    /// Optional daily log file directory
    pub log_dir: Option<String>,
    /// Session credential configuration
    pub jwt: JwtConfig,
    /// Session cookie attributes
    pub cookies: CookieConfig,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let jwt = JwtConfig::default();

        let secure_default = environment != "development";
        let cookies = CookieConfig {
            secure: std::env::var("COOKIE_SECURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(secure_default),
            max_age_seconds: jwt.expiration_minutes * 60,
            ..CookieConfig::default()
        };

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            backend_api_url: std::env::var("BACKEND_API_URL")
                .unwrap_or_else(|_| "http://localhost:4000".to_string()),
            backend_api_token: std::env::var("BACKEND_API_TOKEN").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment,
            jwt,
            cookies,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
