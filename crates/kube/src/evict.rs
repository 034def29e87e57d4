//! Posting graceful evictions.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::EvictParams;
use kube::core::ErrorResponse;
use kube::{Api, Client};
use preoomkiller_core::{Candidate, Error, PodEvictor, Result};

/// Eviction client using the pod `eviction` subresource, so disruption
/// budgets and graceful termination are honored.
#[derive(Clone)]
pub struct EvictionApi {
    client: Client,
}

impl EvictionApi {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// 429 means a disruption budget or API throttling deferred the eviction;
/// 404 means the pod is already gone. Both are expected during normal
/// operation and get their own variants.
fn classify_api_error(candidate: &Candidate, response: &ErrorResponse) -> Error {
    match response.code {
        429 => Error::eviction_throttled(candidate.to_string(), response.message.clone()),
        404 => Error::eviction_already_gone(candidate.to_string()),
        _ => Error::eviction(candidate.to_string(), response.message.clone()),
    }
}

#[async_trait]
impl PodEvictor for EvictionApi {
    async fn evict(&self, candidate: &Candidate) -> Result<()> {
        let api = Api::<Pod>::namespaced(self.client.clone(), &candidate.namespace);
        match api.evict(&candidate.name, &EvictParams::default()).await {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(response)) => Err(classify_api_error(candidate, &response)),
            Err(err) => Err(Error::eviction(candidate.to_string(), err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(code: u16, reason: &str, message: &str) -> ErrorResponse {
        ErrorResponse {
            status: "Failure".to_string(),
            message: message.to_string(),
            reason: reason.to_string(),
            code,
        }
    }

    #[test]
    fn test_throttling_is_not_a_failure() {
        let candidate = Candidate::new("default", "web-0", None);
        let error = classify_api_error(
            &candidate,
            &response(429, "TooManyRequests", "too many requests"),
        );
        assert!(matches!(error, Error::EvictionThrottled { .. }));
    }

    #[test]
    fn test_an_already_deleted_pod_is_not_a_failure() {
        let candidate = Candidate::new("default", "web-0", None);
        let error = classify_api_error(&candidate, &response(404, "NotFound", "pod not found"));
        assert!(matches!(error, Error::EvictionAlreadyGone { .. }));
    }

    #[test]
    fn test_other_api_errors_are_eviction_failures() {
        let candidate = Candidate::new("default", "web-0", None);
        let error = classify_api_error(&candidate, &response(403, "Forbidden", "RBAC says no"));
        assert!(matches!(error, Error::Eviction { .. }));
        assert!(error.to_string().contains("RBAC says no"));
    }
}
