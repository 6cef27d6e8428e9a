//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub mail: MailConfig,
    pub analytics: AnalyticsJobConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    /// Base URL used when building links sent by email
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
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
    /// Apply pending migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration. Expiry values are in seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
    #[serde(default = "default_email_token_expiry")]
    pub email_token_expiry: i64,
    #[serde(default = "default_password_reset_expiry")]
    pub password_reset_expiry: i64,
}

/// Account policy
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Reject logins until the email address is confirmed
    #[serde(default = "default_true")]
    pub require_email_confirmation: bool,
}

/// Rate limiting configuration (fixed window per client)
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
    #[serde(default = "default_redis_timeout_ms")]
    pub redis_timeout_ms: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Outgoing mail configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_mail_from")]
    pub from: String,
}

/// Scheduled analytics aggregation
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsJobConfig {
    #[serde(default = "default_true")]
    pub job_enabled: bool,
    #[serde(default = "default_job_interval_seconds")]
    pub job_interval_seconds: u64,
    /// Number of past days recomputed on each run (today included)
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

// Default value functions
fn default_app_name() -> String {
    "social-network".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    604_800 // 7 days
}

fn default_email_token_expiry() -> i64 {
    86_400 // 1 day
}

fn default_password_reset_expiry() -> i64 {
    3600
}

fn default_max_requests() -> u32 {
    100
}

fn default_window_seconds() -> u64 {
    60
}

fn default_redis_timeout_ms() -> u64 {
    100
}

fn default_mail_from() -> String {
    "noreply@social.local".to_string()
}

fn default_job_interval_seconds() -> u64 {
    300
}

fn default_lookback_days() -> u32 {
    7
}

fn default_cache_ttl_seconds() -> u64 {
    60
}

/// Parse an optional environment variable, ignoring malformed values
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Parse a boolean flag; accepts true/false, 1/0, yes/no, on/off
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_bool(key: &str) -> Option<bool> {
    env::var(key).ok().as_deref().and_then(parse_bool)
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let port = match env::var("API_PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("API_PORT", raw))?,
            Err(_) => return Err(ConfigError::MissingVar("API_PORT")),
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
                public_base_url: env::var("PUBLIC_BASE_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| default_public_base_url()),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(default_max_connections),
                min_connections: env_parse("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(default_min_connections),
                run_migrations: env_bool("DATABASE_RUN_MIGRATIONS").unwrap_or_else(default_true),
                migrations_dir: env::var("DATABASE_MIGRATIONS_DIR")
                    .unwrap_or_else(|_| default_migrations_dir()),
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").map_err(|_| ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: env_parse("REDIS_MAX_CONNECTIONS")
                    .unwrap_or_else(default_redis_max_connections),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: env_parse("JWT_ACCESS_TOKEN_EXPIRY")
                    .unwrap_or_else(default_access_token_expiry),
                refresh_token_expiry: env_parse("JWT_REFRESH_TOKEN_EXPIRY")
                    .unwrap_or_else(default_refresh_token_expiry),
                email_token_expiry: env_parse("JWT_EMAIL_TOKEN_EXPIRY")
                    .unwrap_or_else(default_email_token_expiry),
                password_reset_expiry: env_parse("JWT_PASSWORD_RESET_EXPIRY")
                    .unwrap_or_else(default_password_reset_expiry),
            },
            auth: AuthConfig {
                require_email_confirmation: env_bool("AUTH_REQUIRE_EMAIL_CONFIRMATION")
                    .unwrap_or_else(default_true),
            },
            rate_limit: RateLimitConfig {
                enabled: env_bool("RATE_LIMIT_ENABLED").unwrap_or_else(default_true),
                max_requests: env_parse("RATE_LIMIT_MAX_REQUESTS")
                    .unwrap_or_else(default_max_requests),
                window_seconds: env_parse("RATE_LIMIT_WINDOW_SECONDS")
                    .unwrap_or_else(default_window_seconds),
                redis_timeout_ms: env_parse("RATE_LIMIT_REDIS_TIMEOUT_MS")
                    .unwrap_or_else(default_redis_timeout_ms),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| split_origins(&s))
                    .unwrap_or_default(),
            },
            mail: MailConfig {
                from: env::var("MAIL_FROM").unwrap_or_else(|_| default_mail_from()),
            },
            analytics: AnalyticsJobConfig {
                job_enabled: env_bool("ANALYTICS_JOB_ENABLED").unwrap_or_else(default_true),
                job_interval_seconds: env_parse("ANALYTICS_JOB_INTERVAL_SECONDS")
                    .unwrap_or_else(default_job_interval_seconds),
                lookback_days: env_parse("ANALYTICS_LOOKBACK_DAYS")
                    .unwrap_or_else(default_lookback_days),
                cache_ttl_seconds: env_parse("ANALYTICS_CACHE_TTL_SECONDS")
                    .unwrap_or_else(default_cache_ttl_seconds),
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
