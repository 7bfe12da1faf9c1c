mod cli;

use crate::cli::{CacheBackendArg, StorageBackendArg, CLI};
use anyhow::Context;
use axum::http::HeaderName;
use clap::Parser;
use pasta_cache::{LayeredCache, MokaPasteCache, NoopCache, PasteCache, RedisPasteCache};
use pasta_core::{Pastebin, Repository};
use pasta_gateway::{App, AppState};
use pasta_generator::RandomGenerator;
use pasta_service::{PasteService, ServiceConfig};
use pasta_storage::{InMemoryRepository, MySqlRepository};
use pasta_telemetry::TelemetryConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;

    let _telemetry = pasta_telemetry::init(&TelemetryConfig {
        log_format: config.log_format.into(),
        otlp_endpoint: config.otlp_endpoint.clone(),
        ..TelemetryConfig::default()
    })?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        cache_backend = %config.cache,
        id_length = config.id_length,
        "starting pasta http server"
    );

    let identity_header = HeaderName::try_from(config.identity_header.as_str())
        .with_context(|| format!("invalid identity header '{}'", config.identity_header))?;
    let pastebin = build_pastebin(&config).await?;
    let state = AppState::new(pastebin, identity_header);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn build_pastebin(config: &CLI) -> anyhow::Result<Arc<dyn Pastebin>> {
    match config.storage {
        StorageBackendArg::InMemory => with_cache(InMemoryRepository::new(), config).await,
        StorageBackendArg::Mysql => {
            let dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(dsn).await?;
            repository.ensure_schema().await?;
            with_cache(repository, config).await
        }
    }
}

async fn with_cache<R: Repository>(
    repository: R,
    config: &CLI,
) -> anyhow::Result<Arc<dyn Pastebin>> {
    let ttl = Duration::from_secs(config.cache_ttl_secs);
    let moka = || -> MokaPasteCache {
        MokaPasteCache::builder()
            .max_capacity(config.cache_capacity)
            .ttl(ttl)
            .build()
    };

    match config.cache {
        CacheBackendArg::Disabled => Ok(assemble(repository, NoopCache, config)),
        CacheBackendArg::Moka => Ok(assemble(repository, moka(), config)),
        CacheBackendArg::Redis => {
            let redis = connect_redis(config, ttl).await?;
            Ok(assemble(repository, redis, config))
        }
        CacheBackendArg::Layered => {
            let redis = connect_redis(config, ttl).await?;
            Ok(assemble(repository, LayeredCache::new(moka(), redis), config))
        }
    }
}

async fn connect_redis(config: &CLI, ttl: Duration) -> anyhow::Result<RedisPasteCache> {
    let url = config
        .redis_url
        .as_deref()
        .context("redis url is required for the redis and layered caches")?;
    Ok(RedisPasteCache::connect(url, ttl).await?)
}

fn assemble<R: Repository, C: PasteCache>(
    repository: R,
    cache: C,
    config: &CLI,
) -> Arc<dyn Pastebin> {
    let service_config = ServiceConfig::builder()
        .store_timeout(Duration::from_millis(config.store_timeout_ms))
        .max_content_bytes(config.max_content_bytes)
        .build();

    Arc::new(PasteService::with_config(
        repository,
        cache,
        RandomGenerator::new(config.id_length),
        service_config,
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
