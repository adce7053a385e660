//! The reconciliation loop.

use tokio::sync::mpsc;

use super::ReconciliationState;
use crate::registrar::{DnsRecord, DnsRegistrar, RegistrarError, SetOutcome};

/// What to do when the startup read of the registrar record fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitFailurePolicy {
    /// Log the error and start with an unknown baseline; the first resolved
    /// IP then triggers an update.
    #[default]
    ProceedWithUnknown,
    /// Return the error so the caller can stop the process.
    Abort,
}

/// Result of reconciling one resolved IP.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// The IP matched the baseline; the registrar was not contacted.
    Unchanged,
    /// The record was replaced and the registrar confirmed it.
    Updated,
    /// The record was replaced but the registrar sent back a message.
    UpdatedWithWarning(String),
    /// The update failed; the baseline was left as it was.
    Failed(RegistrarError),
}

/// Owns the baseline and pushes updates when the public IP moves.
#[derive(Debug)]
pub struct Reconciler<R> {
    registrar: R,
    state: ReconciliationState,
}

impl<R: DnsRegistrar> Reconciler<R> {
    /// Creates a reconciler with a known (or explicitly unknown) baseline.
    #[must_use]
    pub const fn with_baseline(registrar: R, baseline: Option<String>) -> Self {
        Self {
            registrar,
            state: ReconciliationState::new(baseline),
        }
    }

    /// Reads the registrar once to seed the baseline.
    ///
    /// # Errors
    ///
    /// Returns the registrar error only under [`InitFailurePolicy::Abort`].
    pub async fn initialize(
        registrar: R,
        on_failure: InitFailurePolicy,
    ) -> Result<Self, RegistrarError> {
        let baseline = match registrar.get_current_record().await {
            Ok(record) => {
                tracing::info!("Current registrar IP: {}", record.value);
                Some(record.value)
            }
            Err(e) if on_failure == InitFailurePolicy::Abort => {
                tracing::error!("Failed to get IP from registrar: {e}");
                return Err(e);
            }
            Err(e) => {
                tracing::error!(
                    "Failed to get IP from registrar: {e}; continuing with unknown baseline"
                );
                None
            }
        };

        Ok(Self::with_baseline(registrar, baseline))
    }

    /// Returns the current baseline.
    #[must_use]
    pub fn baseline(&self) -> Option<&str> {
        self.state.baseline()
    }

    /// Compares `new_ip` with the baseline and pushes an update if they differ.
    ///
    /// The baseline moves to `new_ip` whenever the registrar accepted the
    /// update, including when it answered with a warning.
    pub async fn reconcile(&mut self, new_ip: &str) -> ReconcileOutcome {
        tracing::debug!("Detected public IP: {new_ip}");

        if self.state.matches(new_ip) {
            tracing::debug!("IP unchanged ({new_ip}), nothing to do");
            return ReconcileOutcome::Unchanged;
        }

        tracing::info!(
            "IP changed from {} to {new_ip}, updating registrar record",
            self.state.baseline().unwrap_or("<unknown>")
        );

        let record = DnsRecord::for_update(new_ip);
        match self.registrar.set_record(&record).await {
            Ok(SetOutcome::Confirmed) => {
                self.state.synced(new_ip);
                tracing::info!("Registrar record updated to {new_ip}");
                ReconcileOutcome::Updated
            }
            Ok(SetOutcome::Warning(message)) => {
                self.state.synced(new_ip);
                tracing::warn!("Registrar accepted update to {new_ip} with message: {message}");
                ReconcileOutcome::UpdatedWithWarning(message)
            }
            Err(e) => {
                tracing::error!("Failed to update registrar record: {e}");
                ReconcileOutcome::Failed(e)
            }
        }
    }

    /// Reconciles every IP received until the sender side closes.
    pub async fn run(mut self, mut rx: mpsc::Receiver<String>) {
        while let Some(ip) = rx.recv().await {
            self.reconcile(&ip).await;
        }
    }
}
