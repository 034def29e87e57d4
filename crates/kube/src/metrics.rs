//! Reading live memory usage from the metrics.k8s.io API.

use std::borrow::Cow;
use std::collections::BTreeMap;

use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::NamespaceResourceScope;
use kube::{Api, Client, Resource};
use preoomkiller_core::{Candidate, Error, MemoryQuantity, MetricsSource, Result, UsageSample};
use serde::Deserialize;

/// A `PodMetrics` object as served by metrics.k8s.io/v1beta1.
///
/// k8s-openapi does not cover the metrics API, so the shape is declared
/// here with just the fields the controller reads.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PodMetrics {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub window: Option<String>,
    #[serde(default)]
    pub containers: Vec<ContainerMetrics>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContainerMetrics {
    pub name: String,
    #[serde(default)]
    pub usage: BTreeMap<String, Quantity>,
}

impl Resource for PodMetrics {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        Cow::Borrowed("PodMetrics")
    }

    fn group(_: &()) -> Cow<'_, str> {
        Cow::Borrowed("metrics.k8s.io")
    }

    fn version(_: &()) -> Cow<'_, str> {
        Cow::Borrowed("v1beta1")
    }

    // Served under the same plural as the pods it describes.
    fn plural(_: &()) -> Cow<'_, str> {
        Cow::Borrowed("pods")
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Metrics API client, one GET per candidate pod.
#[derive(Clone)]
pub struct MetricsApi {
    client: Client,
}

impl MetricsApi {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn memory_samples(pod: &str, metrics: PodMetrics) -> Result<Vec<UsageSample>> {
    let mut samples = Vec::with_capacity(metrics.containers.len());
    for container in metrics.containers {
        let ContainerMetrics { name, usage } = container;
        let memory = match usage.get("memory") {
            Some(quantity) => MemoryQuantity::parse(&quantity.0).map_err(|err| {
                Error::metrics_unavailable(
                    pod,
                    format!(
                        "container {name} reports unparseable memory usage '{}': {err}",
                        quantity.0
                    ),
                )
            })?,
            // A scrape can omit a resource entirely for a fresh container.
            None => MemoryQuantity::zero(),
        };
        samples.push(UsageSample {
            container: name,
            memory,
        });
    }
    Ok(samples)
}

#[async_trait]
impl MetricsSource for MetricsApi {
    async fn usage_samples(&self, candidate: &Candidate) -> Result<Vec<UsageSample>> {
        let api = Api::<PodMetrics>::namespaced(self.client.clone(), &candidate.namespace);
        let metrics = api
            .get(&candidate.name)
            .await
            .map_err(|err| Error::metrics_unavailable(candidate.to_string(), err.to_string()))?;
        memory_samples(&candidate.to_string(), metrics)
    }
}
