//! In-memory fakes for the controller's collaborators.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use preoomkiller_core::{
    Candidate, Error, MetricsSource, PodEvictor, PodLister, Result, UsageSample,
};

pub fn candidate(namespace: &str, name: &str, threshold: Option<&str>) -> Candidate {
    Candidate::new(namespace, name, threshold.map(String::from))
}

pub fn sample(container: &str, memory: &str) -> UsageSample {
    UsageSample {
        container: container.to_string(),
        memory: memory.parse().unwrap(),
    }
}

#[derive(Default)]
pub struct FakeLister {
    pub candidates: Vec<Candidate>,
    pub fail: bool,
    /// Shared so tests can count cycles after the lister moves into the
    /// controller.
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl PodLister for FakeLister {
    async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::enumeration("preoomkiller-enabled=true", "boom"));
        }
        Ok(self.candidates.clone())
    }
}

/// Usage keyed by "namespace/name". Pods without an entry fail the way a
/// pod the metrics server has not scraped yet does.
#[derive(Default)]
pub struct FakeMetrics {
    pub usage: HashMap<String, Vec<UsageSample>>,
}

impl FakeMetrics {
    pub fn with_usage(self, pod: &str, memory: &str) -> Self {
        self.with_samples(pod, vec![sample("app", memory)])
    }

    pub fn with_samples(mut self, pod: &str, samples: Vec<UsageSample>) -> Self {
        self.usage.insert(pod.to_string(), samples);
        self
    }
}

#[async_trait]
impl MetricsSource for FakeMetrics {
    async fn usage_samples(&self, candidate: &Candidate) -> Result<Vec<UsageSample>> {
        self.usage
            .get(&candidate.to_string())
            .cloned()
            .ok_or_else(|| Error::metrics_unavailable(candidate.to_string(), "no metrics yet"))
    }
}

#[derive(Clone, Copy)]
pub enum EvictBehavior {
    Succeed,
    Throttle,
    Gone,
    Fail,
}

#[derive(Default)]
pub struct FakeEvictor {
    pub behavior: HashMap<String, EvictBehavior>,
    /// Shared so tests can inspect attempts after the evictor moves into
    /// the controller.
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeEvictor {
    pub fn with_behavior(mut self, pod: &str, behavior: EvictBehavior) -> Self {
        self.behavior.insert(pod.to_string(), behavior);
        self
    }
}

#[async_trait]
impl PodEvictor for FakeEvictor {
    async fn evict(&self, candidate: &Candidate) -> Result<()> {
        let pod = candidate.to_string();
        self.calls.lock().unwrap().push(pod.clone());
        match self
            .behavior
            .get(&pod)
            .copied()
            .unwrap_or(EvictBehavior::Succeed)
        {
            EvictBehavior::Succeed => Ok(()),
            EvictBehavior::Throttle => Err(Error::eviction_throttled(pod, "too many requests")),
            EvictBehavior::Gone => Err(Error::eviction_already_gone(pod)),
            EvictBehavior::Fail => Err(Error::eviction(pod, "boom")),
        }
    }
}

/// Never returns; for exercising the per-call deadline.
pub struct HangingLister;

#[async_trait]
impl PodLister for HangingLister {
    async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        std::future::pending().await
    }
}

pub struct HangingEvictor;

#[async_trait]
impl PodEvictor for HangingEvictor {
    async fn evict(&self, _candidate: &Candidate) -> Result<()> {
        std::future::pending().await
    }
}
