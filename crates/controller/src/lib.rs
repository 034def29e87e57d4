//! The preoomkiller control loop.
//!
//! [`Controller`] drives one reconciliation cycle at a time: list the pods
//! opted in by label, compare each pod's live memory usage against its
//! threshold annotation, and gracefully evict the pods above it.
//! [`Controller::run`] repeats cycles on a fixed interval until cancelled,
//! so a pod restarts on its own terms before the kernel OOM killer gets to
//! pick for it.

mod config;
mod executor;
mod reconciler;
mod runner;

pub use self::{config::ControllerConfig, reconciler::Controller};
