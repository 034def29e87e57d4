//! Core domain types, errors, and constants for the `preoomkiller` controller.
//!
//! This crate establishes the foundational data structures and error handling
//! used throughout the codebase, and defines the trait seams behind which the
//! Kubernetes API collaborators live so the reconciliation logic can be tested
//! against fakes.
//!
//! ## Key Components
//!
//! - **`errors`**: the primary `Error` enum and `Result` type alias, one
//!   variant per failure class so callers can contain each failure at the
//!   smallest possible scope.
//! - **`quantity`**: parsing of Kubernetes quantity strings ("512Mi", "1Gi",
//!   "129e6") into a normalized, comparable [`quantity::MemoryQuantity`].
//! - **`types`**: the per-cycle domain model: candidates, usage samples,
//!   eviction outcomes, and cycle counters.
//! - **`traits`**: the pod enumeration, metrics, and eviction collaborators.
//! - **`constants`**: the eligibility label selector, the threshold
//!   annotation key, and loop defaults.

pub mod constants;
pub mod errors;
pub mod quantity;
pub mod traits;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    quantity::{MemoryQuantity, ParseQuantityError},
    traits::{MetricsSource, PodEvictor, PodLister},
    types::{aggregate_usage, Candidate, CycleStats, EvictionOutcome, UsageSample},
};
