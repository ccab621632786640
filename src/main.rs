//! IMF Gadget API server
//!
//! Reads configuration from a TOML file (~/.config/imf-gadgets/config.toml
//! or `$GADGET_CONFIG`), then environment overrides.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use imf_gadgets::config::LoggingConfig;
use imf_gadgets::domain::RepositoryProvider;
use imf_gadgets::infrastructure::database::seed::{seed_demo_gadgets, seed_reference_users};
use imf_gadgets::shared::ShutdownCoordinator;
use imf_gadgets::{
    create_api_router, init_database, resolve_config_path, run_migrations, AppConfig,
    SeaOrmRepositoryProvider,
};

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = resolve_config_path();
    let (app_cfg, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&app_cfg.logging);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) if e.is_fatal() => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    info!("Starting IMF Gadget API...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()?;
    info!("Prometheus metrics recorder installed");

    let jwt_config = app_cfg.jwt_config();
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&app_cfg.database_config()).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = run_migrations(&db).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }

    // ── Seed data ──────────────────────────────────────────────
    if app_cfg.seed.enabled {
        match seed_reference_users(
            &db,
            &app_cfg.seed.default_password,
            app_cfg.security.bcrypt_cost,
        )
        .await
        {
            Ok(0) => {}
            Ok(n) => warn!("Created {} reference accounts with the default password", n),
            Err(e) => error!("Failed to seed reference accounts: {}", e),
        }
    }
    if app_cfg.seed.demo_gadgets {
        if let Err(e) = seed_demo_gadgets(&db).await {
            error!("Failed to seed demo gadgets: {}", e);
        }
    }

    // ── Router ─────────────────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let api_router = create_api_router(repos, jwt_config, &app_cfg, prometheus_handle);

    // ── Shutdown handling ──────────────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    shutdown.start_signal_listener();
    let shutdown_signal = shutdown.signal();

    // ── Serve ──────────────────────────────────────────────────
    let api_addr = app_cfg.listen_addr();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let serve_result = axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await;

    if let Err(e) = &serve_result {
        error!("REST API server error: {}", e);
    }

    // ── Cleanup ────────────────────────────────────────────────
    shutdown
        .cleanup_with_timeout(|| async move {
            match db.close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!("Error closing database connection: {}", e),
            }
        })
        .await;

    info!("IMF Gadget API shutdown complete");
    serve_result.map_err(Into::into)
}
