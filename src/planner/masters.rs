//! Master selection
//!
//! Chooses which of the configured nodes join the consensus group. Subnets
//! are the failure-domain proxy: with enough distinct subnets every master
//! gets its own, otherwise selection falls back to node-index order.

use crate::planner::nodes::NodePlan;
use std::collections::{BTreeMap, BTreeSet};

/// Given the configured nodes and the number of masters, select the masters
/// and mark them as such.
///
/// When the nodes span at least `max_master_subnets` distinct subnets, the
/// subnets are walked in sorted order and the lexicographically smallest
/// node name of each becomes a master, stopping once `num_masters` are
/// chosen. With fewer subnets the first `num_masters` nodes by node index
/// are marked instead. If the pool is smaller than `num_masters`, fewer
/// masters are selected and no error is raised; callers that need a hard
/// failure must validate the pool size beforehand.
pub fn select_masters(
    nodes: &mut BTreeMap<String, NodePlan>,
    num_masters: usize,
    max_master_subnets: usize,
) {
    // Group the cluster nodes by subnet.
    let mut subnet_to_names: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (name, plan) in nodes.iter() {
        subnet_to_names
            .entry(plan.subnet_id.as_str())
            .or_default()
            .insert(name.as_str());
    }
    tracing::info!(
        subnets = subnet_to_names.len(),
        nodes = nodes.len(),
        masters = num_masters,
        "selecting masters"
    );

    let mut chosen: Vec<String> = Vec::new();
    if subnet_to_names.len() >= max_master_subnets {
        // Enough subnets: one master per subnet.
        for names in subnet_to_names.values() {
            if chosen.len() == num_masters {
                break;
            }
            if let Some(name) = names.iter().next() {
                chosen.push(name.to_string());
            }
        }
    } else {
        // We do not have enough subnets. Simply pick enough masters, in
        // node-index order.
        let mut by_idx: Vec<(usize, String)> = nodes
            .values()
            .map(|n| (n.node_idx, n.name.clone()))
            .collect();
        by_idx.sort_unstable();
        chosen.extend(by_idx.into_iter().take(num_masters).map(|(_, name)| name));
    }

    for name in chosen {
        if let Some(node) = nodes.get_mut(&name) {
            node.is_master = true;
            tracing::info!(node = %name, subnet = %node.subnet_id, "chose master");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::nodes::NodeLifecycle;
    use uuid::Uuid;

    fn mock_node(idx: usize, subnet: &str) -> NodePlan {
        NodePlan {
            name: format!("c1-fake-n{}", idx),
            node_idx: idx,
            az_id: Uuid::new_v4(),
            az_name: format!("az-{}", subnet),
            region_code: "r1".to_string(),
            cloud_name: "aws".to_string(),
            subnet_id: subnet.to_string(),
            is_master: false,
            is_data_node: true,
            state: NodeLifecycle::ToBeAdded,
        }
    }

    fn node_map(specs: &[(usize, &str)]) -> BTreeMap<String, NodePlan> {
        specs
            .iter()
            .map(|&(idx, subnet)| {
                let node = mock_node(idx, subnet);
                (node.name.clone(), node)
            })
            .collect()
    }

    #[test]
    fn test_one_master_per_subnet() {
        let mut nodes = node_map(&[
            (1, "subnet-a"),
            (2, "subnet-a"),
            (3, "subnet-b"),
            (4, "subnet-c"),
        ]);
        select_masters(&mut nodes, 3, 3);

        let masters: Vec<&NodePlan> = nodes.values().filter(|n| n.is_master).collect();
        assert_eq!(masters.len(), 3);
        let subnets: BTreeSet<&str> = masters.iter().map(|n| n.subnet_id.as_str()).collect();
        assert_eq!(subnets.len(), 3);
        // Lexicographically smallest name wins within a subnet.
        assert!(nodes["c1-fake-n1"].is_master);
        assert!(!nodes["c1-fake-n2"].is_master);
    }

    #[test]
    fn test_stops_at_target_with_subnets_remaining() {
        let mut nodes = node_map(&[(1, "subnet-a"), (2, "subnet-b"), (3, "subnet-c")]);
        select_masters(&mut nodes, 2, 3);
        assert_eq!(nodes.values().filter(|n| n.is_master).count(), 2);
    }

    #[test]
    fn test_fallback_picks_by_node_index() {
        // Two subnets is below the diversity threshold.
        let mut nodes = node_map(&[(3, "subnet-a"), (1, "subnet-b"), (2, "subnet-a")]);
        select_masters(&mut nodes, 2, 3);

        assert!(nodes["c1-fake-n1"].is_master);
        assert!(nodes["c1-fake-n2"].is_master);
        assert!(!nodes["c1-fake-n3"].is_master);
    }

    #[test]
    fn test_zero_target_selects_nobody() {
        let mut nodes = node_map(&[(1, "subnet-a"), (2, "subnet-b"), (3, "subnet-c")]);
        select_masters(&mut nodes, 0, 3);
        assert_eq!(nodes.values().filter(|n| n.is_master).count(), 0);
    }

    #[test]
    fn test_target_beyond_pool_is_silent() {
        let mut nodes = node_map(&[(1, "subnet-a"), (2, "subnet-a")]);
        select_masters(&mut nodes, 5, 3);
        // All nodes marked, no more, no error.
        assert_eq!(nodes.values().filter(|n| n.is_master).count(), 2);
    }
}
