//! Issue feed service entrypoint.
//!
//! Loads configuration, starts the background refresh loop, and serves the
//! latest snapshot over HTTP until Ctrl-C is received.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use issue_feed::config::FeedSettings;
use issue_feed::server::{bind, build_router, serve};
use issue_feed::telemetry::{TracingTelemetrySink, init_tracing};
use issue_feed::{FeedConfig, FetchError, OctocrabGateway, RefreshOrchestrator, SnapshotStore};
use ortho_config::OrthoConfig;
use tokio::sync::watch;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), FetchError> {
    let settings = load_config()?.resolve()?;
    let FeedSettings {
        token,
        api_base,
        repositories,
        fetch,
        refresh_interval,
        listen_address,
        web_root,
    } = settings;

    let gateway = Arc::new(OctocrabGateway::for_token(&token, &api_base)?);
    let store = SnapshotStore::new();
    let listener = bind(listen_address).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let orchestrator = RefreshOrchestrator::new(gateway, repositories, fetch, store.clone())
        .with_telemetry(Arc::new(TracingTelemetrySink));
    let refresh = tokio::spawn({
        let signal = shutdown_rx.clone();
        async move {
            orchestrator
                .run(refresh_interval, wait_for_shutdown(signal))
                .await;
        }
    });

    tokio::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {error}");
            return;
        }
        info!("shutdown requested");
        let _closed = shutdown_tx.send(true);
    });

    let router = build_router(store, Some(&web_root));
    let served = serve(listener, router, wait_for_shutdown(shutdown_rx)).await;

    refresh.abort();
    if let Err(error) = refresh.await
        && !error.is_cancelled()
    {
        warn!("refresh loop ended abnormally: {error}");
    }
    served
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`FetchError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<FeedConfig, FetchError> {
    FeedConfig::load().map_err(|error| FetchError::Configuration {
        message: error.to_string(),
    })
}

/// Resolves once the shutdown flag is raised or its sender is dropped.
async fn wait_for_shutdown(mut signal: watch::Receiver<bool>) {
    let _changed = signal.wait_for(|stop| *stop).await;
}
