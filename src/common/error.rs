//! Error types for clusterplan

use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === Intent / placement configuration ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Need at least {needed} zones but found only {available} for region {region}")]
    InsufficientZones {
        region: Uuid,
        needed: usize,
        available: usize,
    },

    #[error("Unsupported placement: {num_regions} regions is more than replication factor {replication_factor} allows")]
    TooManyRegions {
        num_regions: usize,
        replication_factor: usize,
    },

    #[error("Placement contains no availability zones")]
    EmptyPlacement,

    // === Zone directory lookups ===
    #[error("Region not found: {0}")]
    RegionNotFound(Uuid),

    #[error("Availability zone not found: {0}")]
    AzNotFound(Uuid),

    // === Generic ===
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Is this a caller-supplied configuration problem (as opposed to a
    /// directory lookup failure)?
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidConfig(_)
                | Error::InsufficientZones { .. }
                | Error::TooManyRegions { .. }
                | Error::EmptyPlacement
        )
    }

    /// Did a zone directory lookup fail to resolve a referenced id?
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::RegionNotFound(_) | Error::AzNotFound(_))
    }
}

// Implement From for common error types
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e.to_string())
    }
}
