//! Taskboard HTTP server.
//!
//! Configuration is read from the environment (and a `.env` file when
//! present); see [`taskboard::config`] for the variables. `RUST_LOG`
//! controls log filtering (default `taskboard=info,tower_http=info`).

use std::process::ExitCode;
use std::sync::Arc;

use taskboard::{
    config::{AppConfig, LogFormat, StorageMode},
    http::{AppState, router},
    identity::UserId,
    storage::{
        Repositories,
        memory::InMemoryDatabase,
        postgres::{build_pool, register_users},
    },
};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("taskboard=info,tower_http=info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

fn open_in_memory(users: &[(UserId, String)]) -> Result<Repositories, BoxError> {
    let database = InMemoryDatabase::new();
    let inserted = database.register_users(users)?;
    tracing::info!(inserted, "registered configured users");
    Ok(Repositories::in_memory_with(database))
}

async fn connect_postgres(
    config: &AppConfig,
    users: Vec<(UserId, String)>,
) -> Result<Repositories, BoxError> {
    let url = config.database_url.clone().unwrap_or_default();
    let pool_size = config.pool_size;
    let pool = tokio::task::spawn_blocking(move || -> Result<_, BoxError> {
        let pool = build_pool(&url, pool_size)?;
        let inserted = register_users(&pool, &users)?;
        tracing::info!(inserted, "registered configured users");
        Ok(pool)
    })
    .await??;
    Ok(Repositories::postgres(&pool))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            init_tracing(LogFormat::Text);
            tracing::error!(%error, "configuration error");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);
    tracing::info!(storage_mode = ?config.storage_mode, "configuration loaded");

    let resolver = config.token_resolver();
    if resolver.users().is_empty() {
        tracing::warn!("AUTH_TOKENS is empty; every authenticated route will answer 401");
    }

    let users = config.known_users();
    let opened = match config.storage_mode {
        StorageMode::InMemory => open_in_memory(&users),
        StorageMode::Postgres => connect_postgres(&config, users).await,
    };
    let repositories = match opened {
        Ok(repositories) => repositories,
        Err(error) => {
            tracing::error!(%error, storage_mode = ?config.storage_mode, "failed to initialise storage");
            return ExitCode::FAILURE;
        }
    };

    let application = router(AppState::new(repositories, Arc::new(resolver)));

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, address = %config.bind_addr, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(address = %config.bind_addr, "listening");

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("server shutdown complete");
    ExitCode::SUCCESS
}

/// Completes on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
