//! Configuration structs

mod app_config;

pub use app_config::{
    AnalyticsJobConfig, AppConfig, AppSettings, AuthConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, JwtConfig, MailConfig, RateLimitConfig, RedisConfig,
    ServerConfig,
};
