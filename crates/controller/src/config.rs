//! Controller tuning knobs.

use std::time::Duration;

use preoomkiller_core::{DEFAULT_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Tuning for the reconciliation loop.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Delay between reconciliation cycles.
    pub interval: Duration,
    /// Deadline applied to each Kubernetes API call.
    pub request_timeout: Duration,
    /// Log would-be evictions without posting them.
    pub dry_run: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            dry_run: false,
        }
    }
}
