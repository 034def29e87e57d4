//! Listing the pods opted in to eviction.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::ListParams;
use kube::{Api, Client};
use preoomkiller_core::{
    Candidate, Error, PodLister, Result, MEMORY_THRESHOLD_ANNOTATION, POD_LABEL_SELECTOR,
};

/// Cluster-wide pod lister filtering on the opt-in label.
#[derive(Clone)]
pub struct PodApi {
    client: Client,
}

impl PodApi {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn candidate_list_params() -> ListParams {
    ListParams::default().labels(POD_LABEL_SELECTOR)
}

fn candidate_from_pod(pod: Pod) -> Option<Candidate> {
    let name = pod.metadata.name?;
    let namespace = pod.metadata.namespace?;
    let threshold = pod
        .metadata
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.get(MEMORY_THRESHOLD_ANNOTATION))
        .cloned();
    Some(Candidate::new(namespace, name, threshold))
}

#[async_trait]
impl PodLister for PodApi {
    async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        let api = Api::<Pod>::all(self.client.clone());
        let pods = api
            .list(&candidate_list_params())
            .await
            .map_err(|err| Error::enumeration(POD_LABEL_SELECTOR, err.to_string()))?;
        Ok(pods.into_iter().filter_map(candidate_from_pod).collect())
    }
}
