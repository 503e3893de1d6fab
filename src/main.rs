//! Card Cache - persistent response cache for a trading-card marketplace client
//!
//! Maintenance process: hydrates the file-backed cache, sweeps expired
//! entries on an interval, and reports statistics on shutdown.

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use card_cache::{cache, spawn_cleanup_task, CacheStore, Config, FileMedium};

/// Main entry point for the cache maintenance process.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Open the file-backed durable medium
/// 4. Create the cache store (hydrates and purges expired entries)
/// 5. Start the periodic expiry sweep
/// 6. Wait for SIGINT/SIGTERM and log final statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "card_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting card cache");

    let config = Config::from_env();
    config.validate()?;
    info!(
        "Configuration loaded: max_size={}, default_ttl={}ms, cleanup_interval={}ms, dir={}",
        config.max_size,
        config.default_ttl_ms,
        config.cleanup_interval_ms,
        config.cache_dir.display()
    );

    let medium = FileMedium::new(&config.cache_dir)
        .with_context(|| format!("opening cache directory {}", config.cache_dir.display()))?;
    let store = cache::shared(CacheStore::new(medium, &config));
    info!("Cache store ready with {} entries", store.read().await.len());

    let cleanup_handle = spawn_cleanup_task(store.clone(), config.cleanup_interval());

    shutdown_signal().await;
    cleanup_handle.abort();
    warn!("Expiry sweep task aborted");

    let stats = store.read().await.stats();
    info!(
        "Shutdown complete: entries={}, hits={}, misses={}, evictions={}, expirations={}, persist_failures={}",
        stats.total_entries,
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.expirations,
        stats.persist_failures
    );
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
}
