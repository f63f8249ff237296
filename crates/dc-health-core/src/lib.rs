pub mod calendar;
pub mod config;
pub mod error;
pub mod sites;
pub mod types;

#[cfg(feature = "repair")]
pub mod repair;

#[cfg(feature = "payback")]
pub mod payback;

pub use config::{CrewParameters, DcHealthConfig, HorizonParameters, ModelConfig, PlantParameters};
pub use error::DcHealthError;
pub use sites::{RevenueProfile, SiteCatalog};
pub use types::*;

/// Standard result type for all dc-health operations
pub type DcHealthResult<T> = Result<T, DcHealthError>;
