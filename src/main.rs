use stockify::application::{
    commands::retry::RetryPolicy,
    ports::{
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
    services::{ApplicationServices, Repositories, ServiceSettings},
};
use stockify::config::{AppConfig, StorageBackend};
use stockify::infrastructure::{
    database,
    memory::InMemoryStore,
    repositories::postgres_repositories,
    security::{Argon2PasswordHasher, BiscuitTokenManager},
    time::SystemClock,
};
use stockify::presentation::http::{
    middleware::rate_limit::RateLimitSettings,
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let repositories = init_storage(&config).await?;

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let settings = ServiceSettings {
        ledger_retry: RetryPolicy::default()
            .with_max_attempts(config.approval_max_attempts())
            .with_attempt_timeout(config.store_timeout()),
        expiry_alert_days: config.expiry_alert_days(),
    };

    let services = Arc::new(ApplicationServices::new(
        repositories,
        password_hasher,
        token_manager,
        clock,
        settings,
    ));

    let options = RouterOptions {
        allowed_origins: config.allowed_origins().to_vec(),
        rate_limit: config
            .rate_limit_enabled()
            .then(RateLimitSettings::default),
    };
    let app = build_router(HttpState::new(services), options);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(%address, backend = ?config.storage_backend(), "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn init_storage(config: &AppConfig) -> Result<Repositories> {
    match config.storage_backend() {
        StorageBackend::Postgres => {
            let pool = database::init_pool(config.database_url()).await?;
            database::run_migrations(&pool).await?;
            let lock_timeout_ms = u64::try_from(config.store_timeout().as_millis())?;
            tracing::info!("connected to postgres, migrations applied");
            Ok(postgres_repositories(pool, lock_timeout_ms))
        }
        StorageBackend::Memory => {
            tracing::warn!("using the in-memory store, data is lost on shutdown");
            Ok(Arc::new(InMemoryStore::new()).repositories())
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
