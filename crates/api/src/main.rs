use std::net::SocketAddr;
use std::sync::Arc;

use rolegate_core::role_service::RoleService;
use rolegate_core::store::{RoleStore, UserDirectory};
use rolegate_db::{MemoryStore, PgRoleStore, PgUserDirectory};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rolegate_api::config::{ServerConfig, StorageBackend};
use rolegate_api::router::build_app_router;
use rolegate_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rolegate_api=debug,rolegate_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        admin_role = %config.admin_role,
        "Loaded server configuration",
    );

    // --- Stores ---
    let (role_store, user_directory) = build_stores(&config).await;
    let service = RoleService::new(role_store, user_directory);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );

    // --- Router ---
    let app = build_app_router(AppState::new(config, service));

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Construct the role store and user directory for the configured backend.
///
/// For Postgres this connects, health-checks and migrates before returning;
/// any failure aborts startup.
async fn build_stores(config: &ServerConfig) -> (Arc<dyn RoleStore>, Arc<dyn UserDirectory>) {
    match config.storage {
        StorageBackend::Postgres => {
            let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

            let pool = rolegate_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            rolegate_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            rolegate_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            (
                Arc::new(PgRoleStore::new(pool.clone())),
                Arc::new(PgUserDirectory::new(pool)),
            )
        }
        StorageBackend::Memory => {
            let store = Arc::new(MemoryStore::with_users(&config.seed_users));
            tracing::warn!(
                seeded_users = config.seed_users.len(),
                "Using in-memory storage; roles are lost on restart",
            );
            (store.clone(), store)
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
