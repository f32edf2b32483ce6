//! # clusterplan
//!
//! Placement planning for replicated database clusters:
//! - Resolves a user intent into a cloud → region → AZ placement tree
//! - Spreads the replication factor across failure domains
//! - Configures provisioning-ready node plans round-robin over the tree
//! - Selects consensus-group masters with subnet diversity
//!
//! ## Architecture
//!
//! ```text
//! UserIntent ──► PlacementInfo ──► Vec<NodePlan> ──► masters flagged
//!   (validate)     (build_placement)  (configure_nodes)  (select_masters)
//!                        ▲
//!                        │ azs_for_region / az
//!                  ZoneDirectory
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use clusterplan::{Planner, PlannerConfig, StaticZoneDirectory, UserIntent};
//!
//! # fn example(directory: StaticZoneDirectory, region: uuid::Uuid) -> clusterplan::Result<()> {
//! let mut planner = Planner::new(directory, PlannerConfig::default());
//! let intent = UserIntent {
//!     is_multi_az: true,
//!     preferred_region: None,
//!     region_list: vec![region],
//!     instance_type: "m3.medium".to_string(),
//!     replication_factor: 3,
//! };
//! let plan = planner.plan(&intent, None, "c1-demo")?;
//! assert_eq!(plan.placement.total_replicas(), 3);
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod directory;
pub mod planner;

// Re-export commonly used types
pub use common::{Error, PlannerConfig, Result};
pub use directory::{AzInfo, StaticZoneDirectory, ZoneCatalog, ZoneDirectory};
pub use planner::{ClusterPlan, ClusterView, NodePlan, PlacementInfo, Planner, UserIntent};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
