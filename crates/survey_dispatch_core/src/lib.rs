//! Shared survey dispatch domain primitives.
//!
//! This crate owns deterministic dispatch behavior: payload contracts, merge
//! semantics, config object key and state machine ARN construction, and
//! checkpoint restart mapping. It intentionally excludes AWS SDK and Lambda
//! runtime concerns, which live in `crates/survey_dispatch_lambda`.

pub mod checkpoint;
pub mod config_keys;
pub mod contract;
pub mod naming;
