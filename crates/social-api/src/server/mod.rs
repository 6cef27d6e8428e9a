//! Server setup and initialization
//!
//! Provides the application builder, dependency wiring and the server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use social_cache::{create_shared_pool, AnalyticsCache, RateLimiter, RedisPoolConfig};
use social_common::{AppConfig, AppError, JwtService};
use social_db::{
    create_pool, run_migrations, PgAnalyticsRepository, PgCommentRepository, PgPostRepository,
    PgReactionRepository, PgUserRepository,
};
use social_service::{
    run_job_loop, AnalyticsAggregationJob, LogMailer, ServiceContextBuilder, ServiceSettings,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::middleware::{apply_middleware, apply_rate_limited};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_rate_limited(create_router(), &state);
    let router = apply_middleware(
        api.merge(health_routes()),
        &config.cors,
        config.app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = social_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("migrations failed: {e}")))?;
        info!(dir = %config.database.migrations_dir, "Migrations applied");
    }

    let redis_pool = create_shared_pool(RedisPoolConfig::from(&config.redis))
        .map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool created");

    let rate_limiter = config
        .rate_limit
        .enabled
        .then(|| RateLimiter::from_config(redis_pool.clone(), &config.rate_limit));
    let analytics_cache = AnalyticsCache::new(
        redis_pool.clone(),
        config.analytics.cache_ttl_seconds,
        config.rate_limit.redis_timeout_ms,
    );

    let mut builder = ServiceContextBuilder::new()
        .pool(pool.clone())
        .redis_pool(redis_pool)
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .analytics_repo(Arc::new(PgAnalyticsRepository::new(pool)))
        .analytics_cache(analytics_cache)
        .jwt_service(Arc::new(JwtService::from_config(&config.jwt)))
        .mailer(Arc::new(LogMailer::new(config.mail.from.clone())))
        .settings(ServiceSettings::from_config(&config));

    if let Some(limiter) = rate_limiter {
        builder = builder.rate_limiter(limiter);
    }

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Resolves on Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {address}: {e}")))?;
    let job_config = config.analytics.clone();

    // Nothing is started until the address is ours
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    let state = create_app_state(config).await?;

    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let job_handle = if job_config.job_enabled {
        let job = Arc::new(AnalyticsAggregationJob::new(state.service_context().clone()));
        let period = Duration::from_secs(job_config.job_interval_seconds.max(1));
        Some(tokio::spawn(run_job_loop(job, period, shutdown_tx.subscribe())))
    } else {
        info!("Analytics aggregation job disabled");
        None
    };

    let app = create_app(state);
    info!("Server listening on http://{addr}");

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    // Stop the job whether the server ended cleanly or not
    let _ = shutdown_tx.send(());
    if let Some(handle) = job_handle {
        if let Err(e) = handle.await {
            warn!(error = %e, "Analytics job task ended abnormally");
        }
    }

    served.map_err(|e| AppError::Config(format!("Server error: {e}")))?;
    info!("Server stopped");

    Ok(())
}
