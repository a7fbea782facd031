pub mod config_store;
pub mod identity;
pub mod queue;
pub mod workflow;
