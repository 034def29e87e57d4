//! The periodic loop around the reconciler.

use std::time::Duration;

use preoomkiller_core::{MetricsSource, PodEvictor, PodLister};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::reconciler::Controller;

impl<L, M, E> Controller<L, M, E>
where
    L: PodLister,
    M: MetricsSource,
    E: PodEvictor,
{
    /// Run reconciliation cycles until the token is cancelled.
    ///
    /// The first cycle starts immediately. Cancellation is observed between
    /// cycles only; an in-flight cycle always completes. A failed cycle is
    /// logged and the loop carries on with the next tick.
    pub async fn run(&self, shutdown: CancellationToken) {
        // tokio's interval panics on a zero period.
        let period = self.config.interval.max(Duration::from_secs(1));
        let mut ticker = tokio::time::interval(period);
        // When a cycle overruns the interval, skip the backlog instead of
        // firing a burst of immediate ticks.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("terminating reconciliation loop");
                    return;
                }
                _ = ticker.tick() => {}
            }
            match self.run_once().await {
                Ok(stats) => info!(
                    "reconciliation cycle complete: {} candidates, {} evicted, {} throttled, {} skipped, {} failed",
                    stats.candidates, stats.evicted, stats.throttled, stats.skipped, stats.failed
                ),
                Err(err) => error!("reconciliation cycle failed: {err}"),
            }
        }
    }
}
