//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use hub_common::{AppConfig, AppError, JwtService};
use hub_db::{
    create_pool, run_migrations, PgAuditLogRepository, PgExpertProfileRepository,
    PgNotificationRepository, PgProfileRepository, MIGRATIONS_DIR,
};
use hub_identity::{IdentityAdminClient, IdentityClient, IdentityClientConfig};
use hub_service::{ServiceContextBuilder, SiteRoutes};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{
    api_cors_layer, apply_middleware, apply_rate_limit, function_cors_layer,
};
use crate::routes::{create_router, function_routes, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = create_router().layer(api_cors_layer(&config.cors, config.app.env.is_production()));
    let functions = function_routes().layer(function_cors_layer());
    let limited = apply_rate_limit(api.merge(functions), &config.rate_limit);

    apply_middleware(limited.merge(health_routes())).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = hub_db::DatabaseConfig {
        url: config.database.url.clone(),
        ..Default::default()
    }
    .with_bounds(config.database.min_connections, config.database.max_connections);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool, MIGRATIONS_DIR)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;

    // Identity provider clients; only the admin client holds the service key
    let identity_config = IdentityClientConfig::from(&config.auth);
    let identity_client = IdentityClient::new(identity_config.clone())
        .map_err(|e| AppError::Config(e.to_string()))?;
    let identity_admin = IdentityAdminClient::new(identity_config, config.auth.service_key.clone())
        .map_err(|e| AppError::Config(e.to_string()))?;

    let jwt_service = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        &config.auth.jwt_audience,
    ));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .profile_repo(Arc::new(PgProfileRepository::new(pool.clone())))
        .expert_profile_repo(Arc::new(PgExpertProfileRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
        .audit_log_repo(Arc::new(PgAuditLogRepository::new(pool.clone())))
        .identity_provider(Arc::new(identity_client))
        .identity_admin(Arc::new(identity_admin))
        .jwt_service(jwt_service)
        .site_routes(SiteRoutes::from_config(&config.site))
        .profile_retry_delay(config.auth.profile_retry_delay())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, &addr).await
}
