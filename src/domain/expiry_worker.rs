//! Background reclamation of logically expired link records.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::domain::repositories::{LinkStore, StoreError};

/// Periodically purges expired records from stores without native expiry.
///
/// Lookups already ignore expired records, so a missed or failed sweep only
/// delays physical removal; it never makes an expired record resolvable.
/// Each sweep is abandoned after `store_timeout`. Runs until the task is
/// aborted.
pub async fn run_expiry_worker<S>(store: Arc<S>, every: Duration, store_timeout: Duration)
where
    S: LinkStore + ?Sized,
{
    let mut ticker = time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let swept = time::timeout(store_timeout, store.purge_expired())
            .await
            .unwrap_or(Err(StoreError::Timeout(store_timeout)));

        match swept {
            Ok(0) => debug!("Expiry sweep: nothing to reclaim"),
            Ok(removed) => info!(removed, "Expiry sweep reclaimed expired links"),
            Err(e) => error!("Expiry sweep failed: {}", e),
        }
    }
}
