//! Error types shared across the preoomkiller crates.
//!
//! Each variant maps to one failure mode of a reconciliation cycle, so
//! callers can decide whether to abort the cycle, skip one pod, or defer the
//! eviction to the next cycle.

use std::time::Duration;

use crate::quantity::ParseQuantityError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Listing the candidate pods failed. Aborts the cycle.
    #[error("failed to list candidate pods for selector '{selector}': {message}")]
    Enumeration { selector: String, message: String },

    /// The threshold annotation is missing or unparseable. Skips the pod.
    #[error("invalid memory threshold annotation on pod {pod}: {message}")]
    ThresholdInvalid {
        pod: String,
        message: String,
        #[source]
        source: Option<ParseQuantityError>,
    },

    /// No usable metrics for the pod this cycle. Skips the pod.
    #[error("metrics unavailable for pod {pod}: {message}")]
    MetricsUnavailable { pod: String, message: String },

    /// The API server rejected the eviction with 429. Retried next cycle.
    #[error("eviction of pod {pod} throttled by the API server: {message}")]
    EvictionThrottled { pod: String, message: String },

    /// The pod disappeared before the eviction landed.
    #[error("pod {pod} no longer exists")]
    EvictionAlreadyGone { pod: String },

    /// The eviction call failed for any other reason.
    #[error("failed to evict pod {pod}: {message}")]
    Eviction { pod: String, message: String },

    /// Client or flag setup failed before the loop could start.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// An API call exceeded the per-request deadline.
    #[error("operation '{operation}' timed out after {duration:?}")]
    Timeout { operation: String, duration: Duration },
}

impl Error {
    #[must_use]
    pub fn enumeration(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Enumeration {
            selector: selector.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn threshold_invalid(
        pod: impl Into<String>,
        message: impl Into<String>,
        source: Option<ParseQuantityError>,
    ) -> Self {
        Self::ThresholdInvalid {
            pod: pod.into(),
            message: message.into(),
            source,
        }
    }

    #[must_use]
    pub fn metrics_unavailable(pod: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MetricsUnavailable {
            pod: pod.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn eviction_throttled(pod: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EvictionThrottled {
            pod: pod.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn eviction_already_gone(pod: impl Into<String>) -> Self {
        Self::EvictionAlreadyGone { pod: pod.into() }
    }

    #[must_use]
    pub fn eviction(pod: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Eviction {
            pod: pod.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }
}
