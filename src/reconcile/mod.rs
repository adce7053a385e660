//! Change detection between the public IP and the registrar record.
//!
//! A poller task ([`spawn_poller`]) delivers resolved IPs over a single-slot
//! channel to the [`Reconciler`], which is the sole owner of the baseline
//! ([`ReconciliationState`]).

mod poller;
mod reconciler;
mod state;


pub use poller::{poll_public_ip, spawn_poller};
pub use reconciler::{InitFailurePolicy, ReconcileOutcome, Reconciler};
pub use state::ReconciliationState;
