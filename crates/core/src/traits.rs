//! Collaborator seams for the reconciliation loop.
//!
//! The controller is generic over these, so tests drive it with in-memory
//! fakes and the binary wires in the Kubernetes-backed implementations.

use async_trait::async_trait;

use crate::errors::Result;
use crate::types::{Candidate, UsageSample};

/// Enumerates pods opted in to eviction.
#[async_trait]
pub trait PodLister: Send + Sync {
    /// List the pods carrying the opt-in label, cluster-wide.
    async fn list_candidates(&self) -> Result<Vec<Candidate>>;
}

/// Fetches live memory usage for one pod.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// One sample per container. Fails with [`Error::MetricsUnavailable`]
    /// when the metrics API has nothing usable for the pod.
    ///
    /// [`Error::MetricsUnavailable`]: crate::errors::Error::MetricsUnavailable
    async fn usage_samples(&self, candidate: &Candidate) -> Result<Vec<UsageSample>>;
}

/// Gracefully evicts a pod.
#[async_trait]
pub trait PodEvictor: Send + Sync {
    /// Ask the API server to evict the pod. Errors distinguish throttling
    /// and already-deleted pods from genuine failures.
    async fn evict(&self, candidate: &Candidate) -> Result<()>;
}
