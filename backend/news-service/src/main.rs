use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use db_pool::{create_pool, DbConfig};
use news_service::config::StorageBackend;
use news_service::db::{MemoryStore, PgStore, Storage};
use news_service::middleware::{IdentityMiddleware, MetricsMiddleware};
use news_service::services::seed_sample_news;
use news_service::{routes, AppState, Config};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SEED_COUNT: usize = 10;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn io_error(err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

async fn healthcheck() -> io::Result<()> {
    let port = std::env::var("NEWS_SERVICE_PORT").unwrap_or_else(|_| "8000".to_string());
    let url = format!("http://127.0.0.1:{}/api/v1/health", port);

    match reqwest::Client::new().get(&url).send().await {
        Ok(resp) if resp.status().is_success() => Ok(()),
        Ok(resp) => {
            eprintln!("healthcheck HTTP status: {}", resp.status());
            Err(io_error("healthcheck failed"))
        }
        Err(e) => {
            eprintln!("healthcheck HTTP error: {}", e);
            Err(io_error("healthcheck error"))
        }
    }
}

async fn connect_storage(config: &Config) -> anyhow::Result<Arc<dyn Storage>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let db_config = DbConfig::from_env("news-service").map_err(anyhow::Error::msg)?;
            db_config.log_config();
            let pool = create_pool(db_config)
                .await
                .context("failed to create database pool")?;

            let store = PgStore::new(pool);
            store.migrate().await?;
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}

/// News Service
///
/// Commands:
/// - (none): run the HTTP server
/// - `healthcheck`: probe the local health endpoint, for container checks
/// - `seed [count]`: insert sample news items and exit
#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    let mut args = std::env::args().skip(1);
    let command = args.next();
    if command.as_deref() == Some("healthcheck") {
        return healthcheck().await;
    }

    init_tracing();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    tracing::info!(
        env = %config.app.env,
        storage = %config.storage.backend,
        "Starting news-service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let storage = connect_storage(&config).await.map_err(|e| {
        tracing::error!("Storage initialization failed: {:#}", e);
        io_error(format!("{:#}", e))
    })?;

    if command.as_deref() == Some("seed") {
        let count = match args.next() {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
            None => DEFAULT_SEED_COUNT,
        };
        seed_sample_news(storage.as_ref(), count)
            .await
            .map_err(io_error)?;
        return Ok(());
    }
    if let Some(other) = command {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unknown command: {}", other),
        ));
    }

    let state = web::Data::new(AppState::new(storage, &config).map_err(io_error)?);
    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    let allowed_origins = config.cors.allowed_origins.clone();

    tracing::info!("Starting HTTP server on {}", bind_address);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(IdentityMiddleware)
            .wrap(MetricsMiddleware)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    shutdown_signal().await;
    tracing::info!("Shutdown signal received");
    server_handle.stop(true).await;

    match server_task.await {
        Ok(result) => result,
        Err(e) => Err(io_error(e)),
    }
}
