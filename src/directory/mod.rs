//! Zone directory: cloud → region → availability zone lookups
//!
//! The planner never owns provider topology; it consumes it through the
//! [`ZoneDirectory`] trait. [`StaticZoneDirectory`] is the in-memory
//! implementation used by the CLI and tests, built from a serde-friendly
//! [`ZoneCatalog`].

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub type CloudId = Uuid;
pub type RegionId = Uuid;
pub type AzId = Uuid;

/// One availability zone with its full region and cloud ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzInfo {
    pub id: AzId,
    pub name: String,
    pub subnet_id: String,
    pub region_id: RegionId,
    pub region_code: String,
    pub region_name: String,
    pub cloud_id: CloudId,
    pub cloud_name: String,
}

/// Read-only lookup capability over provider topology.
pub trait ZoneDirectory {
    /// All AZs belonging to a region.
    fn azs_for_region(&self, region: RegionId) -> Result<Vec<AzInfo>>;

    /// Resolve one AZ with its ancestry.
    fn az(&self, az: AzId) -> Result<AzInfo>;
}

// === Catalog file format ===

/// Serde-friendly cloud → region → zone listing, loadable from TOML/JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneCatalog {
    #[serde(default)]
    pub clouds: Vec<CloudEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudEntry {
    pub id: CloudId,
    pub name: String,
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionEntry {
    pub id: RegionId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub zones: Vec<ZoneEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneEntry {
    pub id: AzId,
    pub name: String,
    pub subnet_id: String,
}

/// In-memory zone directory
#[derive(Debug, Clone, Default)]
pub struct StaticZoneDirectory {
    by_region: HashMap<RegionId, Vec<AzInfo>>,
    by_az: HashMap<AzId, AzInfo>,
    region_codes: HashMap<String, RegionId>,
}

impl StaticZoneDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from a catalog.
    pub fn from_catalog(catalog: &ZoneCatalog) -> Self {
        let mut dir = Self::new();
        for cloud in &catalog.clouds {
            for region in &cloud.regions {
                for zone in &region.zones {
                    dir.insert(AzInfo {
                        id: zone.id,
                        name: zone.name.clone(),
                        subnet_id: zone.subnet_id.clone(),
                        region_id: region.id,
                        region_code: region.code.clone(),
                        region_name: region.name.clone(),
                        cloud_id: cloud.id,
                        cloud_name: cloud.name.clone(),
                    });
                }
            }
        }
        dir
    }

    /// Register one AZ.
    pub fn insert(&mut self, az: AzInfo) {
        self.region_codes
            .insert(az.region_code.clone(), az.region_id);
        self.by_region
            .entry(az.region_id)
            .or_default()
            .push(az.clone());
        self.by_az.insert(az.id, az);
    }

    /// Resolve a human-readable region code to its id.
    pub fn region_id_by_code(&self, code: &str) -> Option<RegionId> {
        self.region_codes.get(code).copied()
    }

    /// All known regions, as (id, code) pairs.
    pub fn regions(&self) -> Vec<(RegionId, String)> {
        let mut regions: Vec<(RegionId, String)> = self
            .region_codes
            .iter()
            .map(|(code, id)| (*id, code.clone()))
            .collect();
        regions.sort_by(|a, b| a.1.cmp(&b.1));
        regions
    }
}

impl ZoneDirectory for StaticZoneDirectory {
    fn azs_for_region(&self, region: RegionId) -> Result<Vec<AzInfo>> {
        self.by_region
            .get(&region)
            .cloned()
            .ok_or(Error::RegionNotFound(region))
    }

    fn az(&self, az: AzId) -> Result<AzInfo> {
        self.by_az.get(&az).cloned().ok_or(Error::AzNotFound(az))
    }
}
