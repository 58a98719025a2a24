//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub site: SiteConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Identity provider configuration
///
/// `anon_key` is the restricted credential for user-context calls;
/// `service_key` is unrestricted and only handed to privileged components.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the identity provider
    pub url: String,
    pub anon_key: String,
    pub service_key: String,
    /// Shared secret the provider signs access tokens with
    pub jwt_secret: String,
    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,
    /// Wait before the single profile re-read in the auth callback
    #[serde(default = "default_profile_retry_delay_ms")]
    pub profile_retry_delay_ms: u64,
    /// Cookie carrying the PKCE code verifier set at sign-in
    #[serde(default = "default_code_verifier_cookie")]
    pub code_verifier_cookie: String,
}

/// Upper bound on the profile retry wait
pub const MAX_PROFILE_RETRY_DELAY_MS: u64 = 5_000;

impl AuthConfig {
    /// Profile retry wait, capped at [`MAX_PROFILE_RETRY_DELAY_MS`]
    #[must_use]
    pub fn profile_retry_delay(&self) -> Duration {
        Duration::from_millis(self.profile_retry_delay_ms.min(MAX_PROFILE_RETRY_DELAY_MS))
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("url", &self.url)
            .field("jwt_audience", &self.jwt_audience)
            .field("profile_retry_delay_ms", &self.profile_retry_delay_ms)
            .field("code_verifier_cookie", &self.code_verifier_cookie)
            .finish_non_exhaustive()
    }
}

/// Public site settings used to build redirects
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Public origin, e.g. `https://example.com`
    pub url: String,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_next_path")]
    pub default_next_path: String,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration for the user-facing API
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "expert-hub".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_jwt_audience() -> String {
    "authenticated".to_string()
}

fn default_profile_retry_delay_ms() -> u64 {
    500
}

fn default_code_verifier_cookie() -> String {
    "auth-code-verifier".to_string()
}

fn default_locale() -> String {
    "ko".to_string()
}

fn default_next_path() -> String {
    "/support-programs".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parsed_or<T: std::str::FromStr>(name: &'static str, default: fn() -> T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default()),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env_name = env::var("APP_ENV").ok();
        let app_env = match env_name.as_deref() {
            Some(raw) => Environment::parse(raw)
                .ok_or_else(|| ConfigError::InvalidValue("APP_ENV", raw.to_string()))?,
            None => default_env(),
        };
        let port_raw = required("API_PORT")?;

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: app_env,
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: port_raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("API_PORT", port_raw.clone()))?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parsed_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            auth: AuthConfig {
                url: required("AUTH_URL")?.trim_end_matches('/').to_string(),
                anon_key: required("AUTH_ANON_KEY")?,
                service_key: required("AUTH_SERVICE_KEY")?,
                jwt_secret: required("AUTH_JWT_SECRET")?,
                jwt_audience: env::var("AUTH_JWT_AUDIENCE").unwrap_or_else(|_| default_jwt_audience()),
                profile_retry_delay_ms: parsed_or(
                    "AUTH_PROFILE_RETRY_DELAY_MS",
                    default_profile_retry_delay_ms,
                )?,
                code_verifier_cookie: env::var("AUTH_CODE_VERIFIER_COOKIE")
                    .unwrap_or_else(|_| default_code_verifier_cookie()),
            },
            site: SiteConfig {
                url: required("SITE_URL")?.trim_end_matches('/').to_string(),
                default_locale: env::var("SITE_DEFAULT_LOCALE").unwrap_or_else(|_| default_locale()),
                default_next_path: env::var("SITE_DEFAULT_NEXT_PATH")
                    .unwrap_or_else(|_| default_next_path()),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parsed_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: parsed_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
