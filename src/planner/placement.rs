//! Placement tree construction
//!
//! Turns a [`UserIntent`] into a cloud → region → AZ tree annotated with
//! per-AZ replica counts. Zone selection within a region is a uniform random
//! draw without replacement, so repeated calls spread load across AZs; tests
//! that need reproducibility must seed the RNG.

use crate::common::{Error, Result};
use crate::directory::{AzId, CloudId, RegionId, ZoneDirectory};
use crate::planner::intent::UserIntent;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One availability zone in the placement tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementAz {
    pub id: AzId,
    pub name: String,
    pub subnet_id: String,
    /// How many replicas this AZ hosts.
    pub replica_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRegion {
    pub id: RegionId,
    pub code: String,
    pub name: String,
    pub zones: Vec<PlacementAz>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementCloud {
    pub id: CloudId,
    pub name: String,
    pub regions: Vec<PlacementRegion>,
}

/// The placement tree: clouds, their regions, and the AZs replicas land in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacementInfo {
    pub clouds: Vec<PlacementCloud>,
}

impl PlacementInfo {
    /// Merge one replica for `az_id` into the tree, resolving its region and
    /// cloud ancestry through the directory. Existing cloud/region/AZ entries
    /// are matched by id; missing ones are appended in encounter order.
    pub fn add_replica(&mut self, directory: &dyn ZoneDirectory, az_id: AzId) -> Result<()> {
        let az = directory.az(az_id)?;

        // Find the placement cloud if it already exists, or create a new one.
        let cloud_idx = match self.clouds.iter().position(|c| c.id == az.cloud_id) {
            Some(pos) => pos,
            None => {
                tracing::debug!(cloud = %az.cloud_name, "adding cloud to placement");
                self.clouds.push(PlacementCloud {
                    id: az.cloud_id,
                    name: az.cloud_name.clone(),
                    regions: Vec::new(),
                });
                self.clouds.len() - 1
            }
        };
        let cloud = &mut self.clouds[cloud_idx];

        // Find the placement region if it already exists, or create a new one.
        let region_idx = match cloud.regions.iter().position(|r| r.id == az.region_id) {
            Some(pos) => pos,
            None => {
                tracing::debug!(region = %az.region_name, "adding region to placement");
                cloud.regions.push(PlacementRegion {
                    id: az.region_id,
                    code: az.region_code.clone(),
                    name: az.region_name.clone(),
                    zones: Vec::new(),
                });
                cloud.regions.len() - 1
            }
        };
        let region = &mut cloud.regions[region_idx];

        // Find the placement AZ if it already exists, or create a new one.
        let zone_idx = match region.zones.iter().position(|z| z.id == az.id) {
            Some(pos) => pos,
            None => {
                tracing::debug!(az = %az.name, "adding zone to placement");
                region.zones.push(PlacementAz {
                    id: az.id,
                    name: az.name.clone(),
                    subnet_id: az.subnet_id.clone(),
                    replica_count: 0,
                });
                region.zones.len() - 1
            }
        };
        let zone = &mut region.zones[zone_idx];

        zone.replica_count += 1;
        tracing::debug!(az = %az.name, replicas = zone.replica_count, "placed replica");
        Ok(())
    }

    /// Sum of replica counts across every AZ in the tree.
    pub fn total_replicas(&self) -> usize {
        self.clouds
            .iter()
            .flat_map(|c| &c.regions)
            .flat_map(|r| &r.zones)
            .map(|z| z.replica_count)
            .sum()
    }

    /// Number of distinct AZ leaves.
    pub fn az_count(&self) -> usize {
        self.clouds
            .iter()
            .flat_map(|c| &c.regions)
            .map(|r| r.zones.len())
            .sum()
    }

    /// Number of distinct regions.
    pub fn region_count(&self) -> usize {
        self.clouds.iter().map(|c| c.regions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.az_count() == 0
    }
}

/// Build the placement tree for a validated intent.
///
/// Strategy depends on the AZ mode and the number of candidate regions:
/// - single-AZ: all replicas colocate in one randomly chosen AZ of the first
///   region;
/// - one region: one replica in each of 3 distinct random AZs;
/// - two regions: 2 AZs in the preferred region, 1 in the other;
/// - three regions: one AZ per region, in list order.
///
/// More regions than the replication factor allows is rejected.
pub fn build_placement(
    intent: &UserIntent,
    directory: &dyn ZoneDirectory,
    rng: &mut impl Rng,
) -> Result<PlacementInfo> {
    intent.validate()?;

    let mut placement = PlacementInfo::default();

    // Single AZ deployment: all replicas in one zone of the first region.
    if !intent.is_multi_az {
        let region = intent.region_list[0];
        let az_list = directory.azs_for_region(region)?;
        let az = az_list.choose(rng).ok_or(Error::InsufficientZones {
            region,
            needed: 1,
            available: 0,
        })?;
        tracing::info!(az = %az.name, candidates = az_list.len(), "single-AZ placement");
        for _ in 0..intent.replication_factor {
            placement.add_replica(directory, az.id)?;
        }
        return Ok(placement);
    }

    match intent.region_list.len() {
        // All three AZs come from the one region.
        1 => select_and_add_zones(directory, intent.region_list[0], 3, &mut placement, rng)?,
        2 => {
            // Two AZs in the preferred region, one in the other. If no
            // preferred region was specified, prefer whichever region has at
            // least two zones, first region winning ties.
            let preferred = match intent.preferred_region {
                Some(region) => region,
                None => {
                    if directory.azs_for_region(intent.region_list[0])?.len() >= 2 {
                        intent.region_list[0]
                    } else {
                        intent.region_list[1]
                    }
                }
            };
            select_and_add_zones(directory, preferred, 2, &mut placement, rng)?;

            let other = if intent.region_list[0] == preferred {
                intent.region_list[1]
            } else {
                intent.region_list[0]
            };
            select_and_add_zones(directory, other, 1, &mut placement, rng)?;
        }
        // One AZ from each of the three regions, in list order.
        3 => {
            for &region in &intent.region_list {
                select_and_add_zones(directory, region, 1, &mut placement, rng)?;
            }
        }
        num_regions => {
            return Err(Error::TooManyRegions {
                num_regions,
                replication_factor: intent.replication_factor,
            })
        }
    }

    Ok(placement)
}

/// Pick `num_zones` distinct AZs from a region at random and merge one
/// replica for each into the placement.
fn select_and_add_zones(
    directory: &dyn ZoneDirectory,
    region: RegionId,
    num_zones: usize,
    placement: &mut PlacementInfo,
    rng: &mut impl Rng,
) -> Result<()> {
    let az_list = directory.azs_for_region(region)?;
    if az_list.len() < num_zones {
        return Err(Error::InsufficientZones {
            region,
            needed: num_zones,
            available: az_list.len(),
        });
    }
    tracing::debug!(%region, num_zones, "selecting zones");

    let chosen: Vec<AzId> = az_list
        .choose_multiple(rng, num_zones)
        .map(|az| az.id)
        .collect();
    for az_id in chosen {
        placement.add_replica(directory, az_id)?;
    }
    Ok(())
}
