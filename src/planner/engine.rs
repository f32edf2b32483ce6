//! Planning engine
//!
//! Ties intent validation, placement construction, and node configuration
//! together behind a single `plan` call. The engine owns the RNG used for
//! AZ selection; seed it through [`Planner::with_seed`] when reproducible
//! plans are needed.

use crate::common::{PlannerConfig, Result};
use crate::directory::ZoneDirectory;
use crate::planner::intent::UserIntent;
use crate::planner::nodes::{configure_nodes, NodePlan};
use crate::planner::placement::{build_placement, PlacementInfo};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Read-only view of the nodes already in a cluster, for edit operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterView {
    pub nodes: Vec<NodePlan>,
}

impl ClusterView {
    /// Start index for provisioning new nodes, based on the current maximum
    /// node index. A cluster being created starts at 1.
    pub fn next_node_index(&self) -> usize {
        self.nodes.iter().map(|n| n.node_idx).max().unwrap_or(0) + 1
    }
}

/// The complete output of one planning call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterPlan {
    pub placement: PlacementInfo,
    pub nodes: Vec<NodePlan>,
}

/// Plans node placement for cluster create and edit operations.
pub struct Planner<D> {
    directory: D,
    config: PlannerConfig,
    rng: StdRng,
}

impl<D: ZoneDirectory> Planner<D> {
    /// Planner with an entropy-seeded RNG. Placement is intentionally
    /// randomized across calls to spread load over AZs.
    pub fn new(directory: D, config: PlannerConfig) -> Self {
        Self {
            directory,
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Planner with a fixed seed, for reproducible plans.
    pub fn with_seed(directory: D, config: PlannerConfig, seed: u64) -> Self {
        Self {
            directory,
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Plan the placement and node set for one create/edit operation.
    ///
    /// Builds the placement tree for the intent, then configures
    /// `replication_factor` new nodes (with as many masters) starting after
    /// the highest index in `existing`, if any.
    pub fn plan(
        &mut self,
        intent: &UserIntent,
        existing: Option<&ClusterView>,
        name_prefix: &str,
    ) -> Result<ClusterPlan> {
        intent.validate()?;

        let placement = build_placement(intent, &self.directory, &mut self.rng)?;
        tracing::info!(
            regions = placement.region_count(),
            zones = placement.az_count(),
            replicas = placement.total_replicas(),
            "placement computed"
        );

        let start_index = existing.map(ClusterView::next_node_index).unwrap_or(1);
        let nodes = configure_nodes(
            name_prefix,
            start_index,
            intent.replication_factor,
            intent.replication_factor,
            self.config.max_master_subnets,
            &placement,
        )?;
        tracing::info!(
            nodes = nodes.len(),
            masters = nodes.iter().filter(|n| n.is_master).count(),
            start_index,
            "nodes configured"
        );

        Ok(ClusterPlan { placement, nodes })
    }
}
