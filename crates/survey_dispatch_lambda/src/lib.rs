//! AWS-oriented adapters and the dispatch handler for survey config loading.
//!
//! This crate owns runtime integration details (the Lambda handler, adapter
//! traits over the external AWS collaborators, and environment resolution)
//! and exposes a single runtime module boundary over the pure primitives in
//! `crates/survey_dispatch_core`.

pub mod adapters;
pub mod handlers;
pub mod runtime;
