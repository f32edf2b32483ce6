//! Configuration for the placement planner

use serde::{Deserialize, Serialize};

/// The only replication factor the planner currently supports.
pub const SUPPORTED_REPLICATION_FACTOR: usize = 3;

/// Planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum number of subnets the masters are spread across. Needs to be
    /// an odd number for consensus to work.
    #[serde(default = "default_max_master_subnets")]
    pub max_master_subnets: usize,
}

fn default_max_master_subnets() -> usize {
    3
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_master_subnets: default_max_master_subnets(),
        }
    }
}
