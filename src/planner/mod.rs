//! Placement planning pipeline
//!
//! The planner is responsible for:
//! - Intent validation (replication factor, region list, preferred region)
//! - Placement tree construction (cloud → region → AZ, per-AZ replica counts)
//! - Node configuration (round-robin assignment over placement leaves)
//! - Master selection (subnet diversity for the consensus group)

pub mod engine;
pub mod intent;
pub mod masters;
pub mod nodes;
pub mod placement;

pub use engine::{ClusterPlan, ClusterView, Planner};
pub use intent::UserIntent;
pub use masters::select_masters;
pub use nodes::{configure_nodes, NodeLifecycle, NodePlan};
pub use placement::{
    build_placement, PlacementAz, PlacementCloud, PlacementInfo, PlacementRegion,
};
