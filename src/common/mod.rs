//! Common utilities and types shared across clusterplan

pub mod config;
pub mod error;

pub use config::{PlannerConfig, SUPPORTED_REPLICATION_FACTOR};
pub use error::{Error, Result};
