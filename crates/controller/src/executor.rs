//! Eviction execution and outcome classification.

use preoomkiller_core::{Candidate, Error, EvictionOutcome, MetricsSource, PodEvictor, PodLister};
use tracing::{error, info, warn};

use crate::reconciler::Controller;

impl<L, M, E> Controller<L, M, E>
where
    L: PodLister,
    M: MetricsSource,
    E: PodEvictor,
{
    /// Post one eviction and fold the error taxonomy into an outcome.
    /// Never propagates an error; a failed eviction must not stop the
    /// remaining candidates from being processed.
    pub(crate) async fn evict_candidate(&self, candidate: &Candidate) -> EvictionOutcome {
        if self.config.dry_run {
            info!("dry-run: would evict pod {candidate}");
            return EvictionOutcome::Succeeded;
        }
        match self
            .with_timeout("evict pod", self.evictor.evict(candidate))
            .await
        {
            Ok(()) => {
                info!("evicted pod {candidate}");
                EvictionOutcome::Succeeded
            }
            Err(Error::EvictionThrottled { message, .. }) => {
                warn!("eviction of pod {candidate} throttled, will retry next cycle: {message}");
                EvictionOutcome::Throttled
            }
            Err(Error::EvictionAlreadyGone { .. }) => {
                info!("pod {candidate} is already gone");
                EvictionOutcome::AlreadyGone
            }
            Err(err) => {
                error!("failed to evict pod {candidate}: {err}");
                EvictionOutcome::Failed
            }
        }
    }
}
