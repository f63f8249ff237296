pub mod curve;
pub mod estimate;

pub use curve::RepairCostCurve;
pub use estimate::{estimate_repair_cost, RepairEstimate, RepairJob};
