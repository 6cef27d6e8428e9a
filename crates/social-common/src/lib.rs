//! # social-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, verify_password, Claims, JwtService, PasswordService, TokenPair, TokenType};
pub use config::{
    AnalyticsJobConfig, AppConfig, AppSettings, AuthConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, JwtConfig, MailConfig, RateLimitConfig, RedisConfig,
    ServerConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
