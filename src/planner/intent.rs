//! User intent for a cluster create or edit operation

use crate::common::{Error, Result, SUPPORTED_REPLICATION_FACTOR};
use crate::directory::RegionId;
use serde::{Deserialize, Serialize};

/// What the user asked for, after form validation by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIntent {
    /// Spread replicas across multiple AZs?
    pub is_multi_az: bool,

    /// Region that should carry the majority of replicas, if any.
    /// Must appear in `region_list` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_region: Option<RegionId>,

    /// Candidate regions, in user-specified order. Non-empty.
    pub region_list: Vec<RegionId>,

    /// Instance type for every node in the cluster.
    pub instance_type: String,

    /// Number of data copies. Only 3 is supported.
    pub replication_factor: usize,
}

impl UserIntent {
    /// Check the invariants the planner relies on.
    pub fn validate(&self) -> Result<()> {
        if self.replication_factor != SUPPORTED_REPLICATION_FACTOR {
            return Err(Error::InvalidConfig(format!(
                "replication factor must be {}, got {}",
                SUPPORTED_REPLICATION_FACTOR, self.replication_factor
            )));
        }

        if self.region_list.is_empty() {
            return Err(Error::InvalidConfig("region list cannot be empty".into()));
        }

        if let Some(preferred) = self.preferred_region {
            if !self.region_list.contains(&preferred) {
                return Err(Error::InvalidConfig(format!(
                    "preferred region {} not in user region list",
                    preferred
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn intent(regions: Vec<RegionId>) -> UserIntent {
        UserIntent {
            is_multi_az: true,
            preferred_region: None,
            region_list: regions,
            instance_type: "m3.medium".to_string(),
            replication_factor: 3,
        }
    }

    #[test]
    fn test_valid_intent() {
        assert!(intent(vec![Uuid::new_v4()]).validate().is_ok());
    }

    #[test]
    fn test_unsupported_replication_factor() {
        let mut bad = intent(vec![Uuid::new_v4()]);
        bad.replication_factor = 5;
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_region_list() {
        assert!(intent(vec![]).validate().is_err());
    }

    #[test]
    fn test_preferred_region_membership() {
        let r1 = Uuid::new_v4();
        let mut it = intent(vec![r1]);
        it.preferred_region = Some(Uuid::new_v4());
        assert!(it.validate().is_err());

        it.preferred_region = Some(r1);
        assert!(it.validate().is_ok());
    }
}
