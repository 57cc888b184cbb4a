//! Availability Gateway - dwelling availability over the Hostaway API
//!
//! Serves `GET /availability/:dwelling` with Redis-cached upstream data and a
//! per-client rate limit.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use availability_gateway::cache::{CacheClient, MemoryCache, RedisCache};
use availability_gateway::config::{CacheBackend, Config};
use availability_gateway::upstream::HostawayClient;
use availability_gateway::{create_router, spawn_cleanup_task, AppState};

/// Main entry point for the availability gateway.
///
/// # Startup Sequence
/// 1. Load `.env` if present and initialize the tracing subscriber
/// 2. Load configuration and log which credentials are present
/// 3. Connect the cache store; a failed Redis connection exits the process
/// 4. Start the background cleanup task
/// 5. Serve the router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "availability_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting availability gateway");

    let config = Config::from_env();
    for (name, presence) in config.presence_report() {
        info!("{}: {}", name, presence);
    }
    info!(
        "Configuration loaded: port={}, cache_backend={:?}, rate_limit={}/{}s, cleanup_interval={}s",
        config.server_port,
        config.cache_backend,
        config.rate_limit_max,
        config.rate_limit_window_secs,
        config.cleanup_interval
    );

    let (cache, memory_cache): (Arc<dyn CacheClient>, Option<MemoryCache>) =
        match config.cache_backend {
            CacheBackend::Redis => match RedisCache::connect(config.redis_url_or_default()).await {
                Ok(redis) => (Arc::new(redis), None),
                Err(e) => {
                    error!("Redis connection error: {}", e);
                    std::process::exit(1);
                }
            },
            CacheBackend::Memory => {
                warn!("Using in-memory cache; cached tokens and availability are lost on restart");
                let memory = MemoryCache::new();
                (Arc::new(memory.clone()), Some(memory))
            }
        };
    info!("Cache store initialized ({})", cache.backend_name());

    let api = Arc::new(HostawayClient::from_config(&config));
    let state = AppState::from_config(&config, cache, api);

    let cleanup_handle =
        spawn_cleanup_task(state.limiter.clone(), memory_cache, config.cleanup_interval);
    info!("Background cleanup task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server running on port {}", config.server_port);

    // Peer addresses feed the per-client rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(cleanup_handle))
    .await
    .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
