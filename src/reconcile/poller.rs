//! Timer task feeding resolved IPs to the reconciler.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::resolver::PublicIpSource;
use crate::time::Sleeper;

/// Repeatedly waits `interval`, resolves the public IP, and sends it on `tx`.
///
/// A slow resolver delays the next tick rather than overlapping with it. A
/// lookup only starts once the channel slot is free, so at most one resolved
/// IP is ever waiting for the reconciler. Returns once the receiver is dropped.
pub async fn poll_public_ip<P, S>(
    source: P,
    sleeper: S,
    interval: Duration,
    tx: mpsc::Sender<String>,
) where
    P: PublicIpSource,
    S: Sleeper,
{
    loop {
        sleeper.sleep(interval).await;

        let Ok(permit) = tx.reserve().await else {
            break;
        };

        match source.resolve().await {
            Ok(ip) => permit.send(ip),
            Err(e) => tracing::error!("Public IP lookup gave up: {e}"),
        }
    }

    tracing::debug!("Reconciler gone, stopping public IP poller");
}

/// Spawns [`poll_public_ip`] on a single-slot channel and returns the receiver.
pub fn spawn_poller<P, S>(
    source: P,
    sleeper: S,
    interval: Duration,
) -> (JoinHandle<()>, mpsc::Receiver<String>)
where
    P: PublicIpSource + 'static,
    S: Sleeper + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    let handle = tokio::spawn(poll_public_ip(source, sleeper, interval, tx));
    (handle, rx)
}
