//! preoomkiller: evicts pods before the kernel OOM killer gets to them.

mod logging;
mod signals;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use preoomkiller_controller::{Controller, ControllerConfig};
use preoomkiller_core::{DEFAULT_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, POD_LABEL_SELECTOR};
use preoomkiller_kube::{build_client, EvictionApi, MetricsApi, PodApi};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "preoomkiller")]
#[command(about = "Preemptively evicts pods approaching their memory threshold", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a kubeconfig file. Defaults to the in-cluster service
    /// account, then the usual kubeconfig locations.
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Seconds between reconciliation cycles.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS, value_name = "SECONDS")]
    interval: u64,

    /// Seconds allowed for each Kubernetes API call.
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS, value_name = "SECONDS")]
    request_timeout: u64,

    /// Log evictions without performing them.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            interval: Duration::from_secs(self.interval),
            request_timeout: Duration::from_secs(self.request_timeout),
            dry_run: self.dry_run,
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let client = build_client(cli.kubeconfig.as_deref()).await?;
    let controller = Controller::new(
        PodApi::new(client.clone()),
        MetricsApi::new(client.clone()),
        EvictionApi::new(client),
        cli.controller_config(),
    );

    let shutdown = CancellationToken::new();
    tokio::spawn(signals::cancel_on_signal(shutdown.clone()));

    info!(
        "watching pods matching {POD_LABEL_SELECTOR} every {}s{}",
        cli.interval,
        if cli.dry_run { " (dry-run)" } else { "" }
    );
    controller.run(shutdown).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_the_documented_flags() {
        let cli = Cli::parse_from(["preoomkiller"]);
        assert_eq!(cli.kubeconfig, None);
        assert_eq!(cli.interval, 60);
        assert_eq!(cli.request_timeout, 15);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_flags_override_the_defaults() {
        let cli = Cli::parse_from([
            "preoomkiller",
            "--kubeconfig",
            "/etc/kubeconfig",
            "--interval",
            "30",
            "--request-timeout",
            "5",
            "--dry-run",
        ]);
        assert_eq!(cli.kubeconfig, Some(PathBuf::from("/etc/kubeconfig")));
        let config = cli.controller_config();
        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.dry_run);
    }
}
