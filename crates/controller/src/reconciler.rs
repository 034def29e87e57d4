//! One reconciliation cycle: list, measure, compare, evict.

use std::future::Future;

use preoomkiller_core::{
    aggregate_usage, Candidate, CycleStats, Error, MetricsSource, PodEvictor, PodLister, Result,
};
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;

/// The eviction controller, generic over its collaborators so tests can
/// drive it without a cluster.
pub struct Controller<L, M, E> {
    pub(crate) lister: L,
    pub(crate) metrics: M,
    pub(crate) evictor: E,
    pub(crate) config: ControllerConfig,
}

impl<L, M, E> Controller<L, M, E>
where
    L: PodLister,
    M: MetricsSource,
    E: PodEvictor,
{
    #[must_use]
    pub fn new(lister: L, metrics: M, evictor: E, config: ControllerConfig) -> Self {
        Self {
            lister,
            metrics,
            evictor,
            config,
        }
    }

    /// Run a single reconciliation cycle.
    ///
    /// Fails only when the candidate listing fails. Per-pod problems, a bad
    /// annotation or missing metrics, skip that pod and show up in the
    /// returned stats; the rest of the cycle proceeds.
    pub async fn run_once(&self) -> Result<CycleStats> {
        let candidates = self
            .with_timeout("list pods", self.lister.list_candidates())
            .await?;
        let mut stats = CycleStats {
            candidates: candidates.len(),
            ..CycleStats::default()
        };
        for candidate in &candidates {
            if let Err(err) = self.process_candidate(candidate, &mut stats).await {
                stats.skipped += 1;
                warn!("skipping pod {candidate}: {err}");
            }
        }
        Ok(stats)
    }

    async fn process_candidate(
        &self,
        candidate: &Candidate,
        stats: &mut CycleStats,
    ) -> Result<()> {
        let threshold = candidate.memory_threshold()?;
        let samples = self
            .with_timeout("fetch pod metrics", self.metrics.usage_samples(candidate))
            .await?;
        for sample in &samples {
            debug!(
                "pod {candidate} container {} uses {}",
                sample.container, sample.memory
            );
        }
        let usage = aggregate_usage(&samples);
        debug!("pod {candidate} uses {usage} of its {threshold} threshold");
        // Strictly above; a pod sitting exactly at its threshold stays.
        if usage > threshold {
            info!("pod {candidate} uses {usage}, above its {threshold} threshold, evicting");
            let outcome = self.evict_candidate(candidate).await;
            stats.record(outcome);
        }
        Ok(())
    }

    pub(crate) async fn with_timeout<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.config.request_timeout, call)
            .await
            .map_err(|_| Error::timeout(operation, self.config.request_timeout))?
    }
}
