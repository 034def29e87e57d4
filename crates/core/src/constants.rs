//! Constants shared across the preoomkiller crates.

// Pod selection
pub const POD_LABEL_SELECTOR: &str = "preoomkiller-enabled=true";
pub const MEMORY_THRESHOLD_ANNOTATION: &str =
    "preoomkiller.alpha.k8s.zapier.com/memory-threshold";

// Reconciliation loop defaults
pub const DEFAULT_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
