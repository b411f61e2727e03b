//! Background sweeper for the rate-limit store.
//!
//! Expired windows are otherwise only replaced when their key is seen
//! again, so clients that stop calling would linger forever.

use std::sync::Arc;

use quotedeck_core::RateLimiter;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

/// Starts the periodic eviction task and returns its handle.
pub fn start_rate_limit_sweeper(limiter: Arc<RateLimiter>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Rate limit sweeper started ({:?} interval)", every);

        let mut sweep_interval = interval(every);
        sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately; nothing can have expired yet.
        sweep_interval.tick().await;

        loop {
            sweep_interval.tick().await;
            run_sweep(&limiter);
        }
    })
}

fn run_sweep(limiter: &RateLimiter) {
    let removed = limiter.evict_expired();
    if removed > 0 {
        debug!(
            "Evicted {} expired rate limit records, {} remaining",
            removed,
            limiter.tracked_keys()
        );
    }
}
