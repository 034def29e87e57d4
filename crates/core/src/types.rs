//! Core domain types for the eviction control loop.

use std::fmt;

use crate::constants::MEMORY_THRESHOLD_ANNOTATION;
use crate::errors::{Error, Result};
use crate::quantity::MemoryQuantity;

/// A labeled pod picked up by the lister, before its threshold annotation
/// has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub namespace: String,
    /// Raw annotation value. `None` when the pod carries the label but not
    /// the annotation.
    pub threshold_annotation: Option<String>,
}

impl Candidate {
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        threshold_annotation: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            threshold_annotation,
        }
    }

    /// The validated memory threshold for this pod.
    pub fn memory_threshold(&self) -> Result<MemoryQuantity> {
        let raw = self.threshold_annotation.as_deref().ok_or_else(|| {
            Error::threshold_invalid(
                self.to_string(),
                format!("annotation {MEMORY_THRESHOLD_ANNOTATION} is not set"),
                None,
            )
        })?;
        MemoryQuantity::parse(raw).map_err(|err| {
            Error::threshold_invalid(self.to_string(), format!("cannot parse '{raw}'"), Some(err))
        })
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Memory usage reported for one container of a pod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSample {
    pub container: String,
    pub memory: MemoryQuantity,
}

/// Total memory usage of a pod across all of its containers.
#[must_use]
pub fn aggregate_usage(samples: &[UsageSample]) -> MemoryQuantity {
    samples.iter().map(|sample| sample.memory).sum()
}

/// What happened to a single eviction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionOutcome {
    Succeeded,
    /// The pod vanished before the call landed. Counts as evicted.
    AlreadyGone,
    /// 429 from the API server. The pod stays on the list for next cycle.
    Throttled,
    Failed,
}

/// Tally of one reconciliation cycle, emitted in the cycle summary log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Pods matching the selector at the start of the cycle.
    pub candidates: usize,
    pub evicted: usize,
    pub throttled: usize,
    /// Pods skipped over a bad annotation or missing metrics.
    pub skipped: usize,
    pub failed: usize,
}

impl CycleStats {
    pub fn record(&mut self, outcome: EvictionOutcome) {
        match outcome {
            EvictionOutcome::Succeeded | EvictionOutcome::AlreadyGone => self.evicted += 1,
            EvictionOutcome::Throttled => self.throttled += 1,
            EvictionOutcome::Failed => self.failed += 1,
        }
    }
}
