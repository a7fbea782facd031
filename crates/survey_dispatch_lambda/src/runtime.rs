//! Single module boundary over the core dispatch primitives, plus the
//! environment resolution that only the Lambda runtime needs.

pub use survey_dispatch_core::{checkpoint, config_keys, contract, naming};

pub mod environment;
