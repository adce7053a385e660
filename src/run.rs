//! Application execution logic.
//!
//! This module wires the resolver, registrar client, reconciler and
//! metrics exporter together and runs them until a shutdown signal.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::JoinHandle;

use ddns_godaddy::config::ValidatedConfig;
use ddns_godaddy::metrics::{Metrics, MetricsError, exporter};
use ddns_godaddy::reconcile::{Reconciler, spawn_poller};
use ddns_godaddy::registrar::{GoDaddyClient, RegistrarError};
use ddns_godaddy::resolver::PublicIpResolver;
use ddns_godaddy::time::TokioSleeper;
use ddns_godaddy::transport::ReqwestClient;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The startup registrar read failed and the policy is to abort.
    #[error("Failed to fetch initial registrar record: {0}")]
    InitialFetch(#[source] RegistrarError),

    /// The metrics registry could not be set up.
    #[error("Failed to set up metrics: {0}")]
    Metrics(#[from] MetricsError),

    /// The registrar client could not be constructed.
    #[error("Failed to set up registrar client: {0}")]
    Registrar(#[source] RegistrarError),

    /// The poller task ended while the reconciler was still waiting.
    #[error("Public IP poller stopped unexpectedly")]
    PollerStopped,
}

/// Executes the main application loop until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// See [`execute_until`].
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// real signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    execute_until(config, shutdown_signal()).await
}

/// Executes the main application loop until `shutdown` completes.
///
/// This function:
/// 1. Starts the metrics exporter on `0.0.0.0:{metrics_port}`, if the port is free
/// 2. Reads the registrar once to seed the baseline
/// 3. Spawns the public IP poller
/// 4. Reconciles every resolved IP until shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The metrics registry cannot be set up
/// - The registrar client cannot be built from the config
/// - The startup read fails under the abort policy
/// - The poller stops on its own
pub async fn execute_until<F>(config: ValidatedConfig, shutdown: F) -> Result<(), RunError>
where
    F: Future<Output = ()>,
{
    let metrics = Arc::new(Metrics::new()?);

    let registrar = GoDaddyClient::new(
        ReqwestClient::new(),
        &config.api_url,
        &config.credentials,
        &config.domain,
        &config.sub_domain,
    )
    .map_err(RunError::Registrar)?;
    tracing::debug!(
        "Registrar record URL: {} (key {})",
        registrar.record_url(),
        config.credentials.key()
    );
    if config.retry_policy.is_unbounded() {
        tracing::debug!("Public IP lookups are retried until they succeed");
    }

    let server = start_exporter(config.metrics_port, Arc::clone(&metrics)).await;

    let result = async {
        let reconciler = Reconciler::initialize(registrar, config.on_init_failure)
            .await
            .map_err(RunError::InitialFetch)?;

        let resolver = PublicIpResolver::new(ReqwestClient::new(), config.ip_url)
            .with_retry_policy(config.retry_policy)
            .with_observer(Arc::clone(&metrics));

        let (poller, rx) = spawn_poller(resolver, TokioSleeper, config.check_interval);

        let outcome = tokio::select! {
            () = shutdown => {
                tracing::info!("Shutdown signal received, exiting");
                Ok(())
            }
            () = reconciler.run(rx) => Err(RunError::PollerStopped),
        };

        poller.abort();
        outcome
    }
    .await;

    if let Some(server) = server {
        server.abort();
    }
    result
}

/// Binds `0.0.0.0:{port}` and serves metrics on a background task.
///
/// A bind failure is logged and the daemon runs without an exporter.
async fn start_exporter(port: u16, metrics: Arc<Metrics>) -> Option<JoinHandle<()>> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind metrics exporter on {addr}: {e}; continuing without it");
            return None;
        }
    };
    if let Ok(local) = listener.local_addr() {
        tracing::info!("Serving metrics on http://{local}/metrics");
    }

    Some(tokio::spawn(async move {
        if let Err(e) = exporter::serve(listener, metrics).await {
            tracing::error!("Metrics exporter stopped: {e}");
        }
    }))
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM on Unix).
///
/// A handler that cannot be installed never fires.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
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
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
