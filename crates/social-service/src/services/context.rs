//! Service context - dependency container for services
//!
//! Holds all repositories, Redis-backed helpers, and other dependencies needed by services.

use std::sync::Arc;

use social_cache::{AnalyticsCache, RateLimiter, SharedRedisPool};
use social_common::auth::{JwtService, PasswordService};
use social_common::AppConfig;
use social_core::traits::{
    AnalyticsRepository, CommentRepository, PostRepository, ReactionRepository, UserRepository,
};
use social_db::PgPool;

use crate::mailer::Mailer;

use super::error::{ServiceError, ServiceResult};

/// Authentication policy
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Reject logins until the email address is confirmed
    pub require_email_confirmation: bool,
}

/// Analytics aggregation settings
#[derive(Debug, Clone)]
pub struct AnalyticsSettings {
    /// Days recomputed by each aggregation run, today included
    pub lookback_days: u32,
}

/// Settings read by services
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub auth: AuthSettings,
    pub analytics: AnalyticsSettings,
    /// Base URL for links sent by email
    pub public_base_url: String,
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            auth: AuthSettings {
                require_email_confirmation: config.auth.require_email_confirmation,
            },
            analytics: AnalyticsSettings {
                lookback_days: config.analytics.lookback_days,
            },
            public_base_url: config.app.public_base_url.clone(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            auth: AuthSettings {
                require_email_confirmation: true,
            },
            analytics: AnalyticsSettings { lookback_days: 7 },
            public_base_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

/// Service context containing all dependencies
///
/// Cloning is cheap: every member is a pool handle or an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    analytics_repo: Arc<dyn AnalyticsRepository>,

    // Redis helpers
    rate_limiter: Option<RateLimiter>,
    analytics_cache: AnalyticsCache,

    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    mailer: Arc<dyn Mailer>,
    settings: Arc<ServiceSettings>,
}

impl ServiceContext {
    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn analytics_repo(&self) -> &dyn AnalyticsRepository {
        self.analytics_repo.as_ref()
    }

    // === Redis helpers ===

    /// Rate limiter, `None` when rate limiting is disabled
    pub fn rate_limiter(&self) -> Option<&RateLimiter> {
        self.rate_limiter.as_ref()
    }

    pub fn analytics_cache(&self) -> &AnalyticsCache {
        &self.analytics_cache
    }

    // === Auth and mail ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Shared handle to the mailer, for background sends
    pub fn mailer(&self) -> Arc<dyn Mailer> {
        Arc::clone(&self.mailer)
    }

    pub fn settings(&self) -> &ServiceSettings {
        self.settings.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("rate_limiter", &self.rate_limiter)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    analytics_repo: Option<Arc<dyn AnalyticsRepository>>,
    rate_limiter: Option<RateLimiter>,
    analytics_cache: Option<AnalyticsCache>,
    jwt_service: Option<Arc<JwtService>>,
    mailer: Option<Arc<dyn Mailer>>,
    settings: Option<ServiceSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn analytics_repo(mut self, repo: Arc<dyn AnalyticsRepository>) -> Self {
        self.analytics_repo = Some(repo);
        self
    }

    /// Enable rate limiting; leave unset to disable it
    pub fn rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub fn analytics_cache(mut self, cache: AnalyticsCache) -> Self {
        self.analytics_cache = Some(cache);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        let redis_pool = required(self.redis_pool, "redis_pool")?;
        let analytics_cache = self
            .analytics_cache
            .unwrap_or_else(|| AnalyticsCache::new(Arc::clone(&redis_pool), 0, 0));

        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            redis_pool,
            user_repo: required(self.user_repo, "user_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            reaction_repo: required(self.reaction_repo, "reaction_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            analytics_repo: required(self.analytics_repo, "analytics_repo")?,
            rate_limiter: self.rate_limiter,
            analytics_cache,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            password_service: PasswordService::new(),
            mailer: required(self.mailer, "mailer")?,
            settings: Arc::new(self.settings.unwrap_or_default()),
        })
    }
}
