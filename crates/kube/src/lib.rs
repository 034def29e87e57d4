//! Kubernetes-backed implementations of the preoomkiller collaborator traits.
//!
//! Everything here is a thin adapter: list pods by label, read the
//! metrics.k8s.io API, post evictions. The decision logic lives in the
//! controller crate and never sees a Kubernetes type.

pub mod client;
pub mod evict;
pub mod metrics;
pub mod pods;

pub use self::{
    client::build_client,
    evict::EvictionApi,
    metrics::{MetricsApi, PodMetrics},
    pods::PodApi,
};
