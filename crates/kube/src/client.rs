//! Kubernetes client construction.

use std::path::Path;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use preoomkiller_core::{Error, Result};

/// Build a client from an explicit kubeconfig path, or infer the
/// configuration from the environment: in-cluster service account first,
/// then the default kubeconfig locations.
pub async fn build_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path).map_err(|err| {
                Error::configuration(format!(
                    "cannot read kubeconfig at {}: {err}",
                    path.display()
                ))
            })?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .map_err(|err| {
                    Error::configuration(format!(
                        "cannot load kubeconfig at {}: {err}",
                        path.display()
                    ))
                })?
        }
        None => Config::infer().await.map_err(|err| {
            Error::configuration(format!("cannot infer cluster configuration: {err}"))
        })?,
    };
    Client::try_from(config)
        .map_err(|err| Error::configuration(format!("cannot construct client: {err}")))
}
