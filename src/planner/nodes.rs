//! Node plans and round-robin node configuration
//!
//! Walks the placement tree leaf by leaf to hand out names, indices, and
//! zone membership to the nodes being provisioned. The walk is a pure
//! round-robin over (cloud, region, AZ) leaves in tree-insertion order; it
//! does not weight assignment by per-AZ replica counts, so the two can
//! disagree when the node count differs from the replication factor.

use crate::common::{Error, Result};
use crate::directory::AzId;
use crate::planner::masters::select_masters;
use crate::planner::placement::PlacementInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle of a cluster node. Planning only ever emits `ToBeAdded`; the
/// remaining states belong to later provisioning phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLifecycle {
    ToBeAdded,
    Provisioned,
    Running,
    ToBeRemoved,
}

impl std::fmt::Display for NodeLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeLifecycle::ToBeAdded => write!(f, "to-be-added"),
            NodeLifecycle::Provisioned => write!(f, "provisioned"),
            NodeLifecycle::Running => write!(f, "running"),
            NodeLifecycle::ToBeRemoved => write!(f, "to-be-removed"),
        }
    }
}

/// Provisioning-ready description of one cluster node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePlan {
    /// Temporary node name; fixed once the operation actually runs.
    pub name: String,
    /// Cluster-unique, monotonically assigned index.
    pub node_idx: usize,
    pub az_id: AzId,
    pub az_name: String,
    pub region_code: String,
    pub cloud_name: String,
    pub subnet_id: String,
    /// Participates in the consensus group?
    pub is_master: bool,
    /// Serves data? Always true for newly planned nodes.
    pub is_data_node: bool,
    pub state: NodeLifecycle,
}

/// Configure the set of nodes to be created.
///
/// Assigns each of `num_nodes` new nodes to a placement leaf round-robin,
/// names it `{prefix}-fake-n{idx}` with contiguous indices from
/// `start_index`, then selects `num_masters` masters over the resulting set.
/// Plans come back sorted by node index.
pub fn configure_nodes(
    name_prefix: &str,
    start_index: usize,
    num_nodes: usize,
    num_masters: usize,
    max_master_subnets: usize,
    placement: &PlacementInfo,
) -> Result<Vec<NodePlan>> {
    if placement.is_empty() {
        return Err(Error::EmptyPlacement);
    }
    if start_index == 0 {
        return Err(Error::InvalidConfig("start index must be at least 1".into()));
    }
    if num_nodes == 0 {
        return Err(Error::InvalidConfig("node count must be positive".into()));
    }

    let mut nodes: BTreeMap<String, NodePlan> = BTreeMap::new();

    let mut cloud_idx = 0;
    let mut region_idx = 0;
    let mut az_idx = 0;
    for node_idx in start_index..start_index + num_nodes {
        let cloud = &placement.clouds[cloud_idx];
        let region = &cloud.regions[region_idx];
        let zone = &region.zones[az_idx];

        let plan = NodePlan {
            name: format!("{}-fake-n{}", name_prefix, node_idx),
            node_idx,
            az_id: zone.id,
            az_name: zone.name.clone(),
            region_code: region.code.clone(),
            cloud_name: cloud.name.clone(),
            subnet_id: zone.subnet_id.clone(),
            is_master: false,
            is_data_node: true,
            state: NodeLifecycle::ToBeAdded,
        };
        tracing::debug!(
            node = %plan.name,
            cloud = cloud_idx,
            region = region_idx,
            az = az_idx,
            "placed new node"
        );
        nodes.insert(plan.name.clone(), plan);

        // Advance to the next az/region/cloud combo.
        az_idx = (az_idx + 1) % region.zones.len();
        if az_idx == 0 {
            region_idx = (region_idx + 1) % cloud.regions.len();
            if region_idx == 0 {
                cloud_idx = (cloud_idx + 1) % placement.clouds.len();
            }
        }
    }

    // Select the masters for this cluster based on subnets.
    select_masters(&mut nodes, num_masters, max_master_subnets);

    let mut plans: Vec<NodePlan> = nodes.into_values().collect();
    plans.sort_by_key(|n| n.node_idx);
    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{AzInfo, StaticZoneDirectory};
    use uuid::Uuid;

    /// One cloud, one region, `num_zones` AZs with distinct subnets,
    /// inserted into the placement in order with one replica each.
    fn placement_with_zones(num_zones: usize) -> PlacementInfo {
        let cloud = Uuid::new_v4();
        let region = Uuid::new_v4();
        let mut dir = StaticZoneDirectory::new();
        let mut az_ids = Vec::new();
        for i in 0..num_zones {
            let id = Uuid::new_v4();
            az_ids.push(id);
            dir.insert(AzInfo {
                id,
                name: format!("az-{}", i),
                subnet_id: format!("subnet-{}", i),
                region_id: region,
                region_code: "r1".to_string(),
                region_name: "region-1".to_string(),
                cloud_id: cloud,
                cloud_name: "aws".to_string(),
            });
        }
        let mut placement = PlacementInfo::default();
        for id in az_ids {
            placement.add_replica(&dir, id).unwrap();
        }
        placement
    }

    #[test]
    fn test_contiguous_indices_and_names() {
        let placement = placement_with_zones(3);
        let plans = configure_nodes("c1", 1, 3, 3, 3, &placement).unwrap();

        assert_eq!(plans.len(), 3);
        for (offset, plan) in plans.iter().enumerate() {
            assert_eq!(plan.node_idx, 1 + offset);
            assert_eq!(plan.name, format!("c1-fake-n{}", 1 + offset));
            assert!(plan.is_data_node);
            assert_eq!(plan.state, NodeLifecycle::ToBeAdded);
        }
    }

    #[test]
    fn test_round_robin_visits_leaves_in_order() {
        let placement = placement_with_zones(3);
        let plans = configure_nodes("c1", 1, 3, 3, 3, &placement).unwrap();

        // One node per leaf, in tree-insertion order starting at leaf 0.
        let expected: Vec<AzId> = placement.clouds[0].regions[0]
            .zones
            .iter()
            .map(|z| z.id)
            .collect();
        let visited: Vec<AzId> = plans.iter().map(|p| p.az_id).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_wraps_leaves_ignoring_replica_counts() {
        // Two leaves, one replica each, but five nodes requested: the walk
        // wraps over the leaves regardless of what the replica counts say.
        let placement = placement_with_zones(2);
        let plans = configure_nodes("c1", 1, 5, 1, 3, &placement).unwrap();

        let leaf0 = placement.clouds[0].regions[0].zones[0].id;
        let leaf1 = placement.clouds[0].regions[0].zones[1].id;
        let visited: Vec<AzId> = plans.iter().map(|p| p.az_id).collect();
        assert_eq!(visited, vec![leaf0, leaf1, leaf0, leaf1, leaf0]);
    }

    #[test]
    fn test_start_index_offsets_names() {
        let placement = placement_with_zones(3);
        let plans = configure_nodes("c1", 4, 2, 1, 3, &placement).unwrap();

        assert_eq!(plans[0].node_idx, 4);
        assert_eq!(plans[1].node_idx, 5);
        assert_eq!(plans[0].name, "c1-fake-n4");
    }

    #[test]
    fn test_empty_placement_rejected() {
        let placement = PlacementInfo::default();
        assert!(matches!(
            configure_nodes("c1", 1, 3, 3, 3, &placement),
            Err(Error::EmptyPlacement)
        ));
    }

    #[test]
    fn test_invalid_counts_rejected() {
        let placement = placement_with_zones(1);
        assert!(configure_nodes("c1", 0, 3, 3, 3, &placement).is_err());
        assert!(configure_nodes("c1", 1, 0, 3, 3, &placement).is_err());
    }

    #[test]
    fn test_masters_selected_with_diverse_subnets() {
        let placement = placement_with_zones(3);
        let plans = configure_nodes("c1", 1, 3, 3, 3, &placement).unwrap();

        let masters: Vec<&NodePlan> = plans.iter().filter(|p| p.is_master).collect();
        assert_eq!(masters.len(), 3);
        // Every master sits in its own subnet.
        let subnets: std::collections::BTreeSet<&str> =
            masters.iter().map(|p| p.subnet_id.as_str()).collect();
        assert_eq!(subnets.len(), 3);
    }
}
