use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar;

/// All monetary values (USD). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Month counts derived from day counts. Display only; days are canonical.
pub type Months = Decimal;

/// Energy in megawatt-hours
pub type MegawattHours = Decimal;

/// Power in kilowatts
pub type Kilowatts = Decimal;

/// Outcome of a payback scan over a finite horizon.
///
/// Variant order matters: `Unreached` sorts after every reached value, so a
/// longer payback and a missing one compare the way a chart would plot them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Payback {
    /// Cumulative revenue met the repair cost on this 1-based day
    Reached { days: u32 },
    /// The horizon ended before the repair cost was recovered
    Unreached,
}

impl Payback {
    pub fn days(&self) -> Option<u32> {
        match self {
            Payback::Reached { days } => Some(*days),
            Payback::Unreached => None,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Payback::Reached { .. })
    }

    /// Payback expressed in average-length months, rounded for display.
    pub fn months(&self) -> Option<Months> {
        self.days().map(calendar::display_months)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unreached_sorts_after_any_reached_payback() {
        assert!(Payback::Reached { days: 730 } < Payback::Unreached);
        assert!(Payback::Reached { days: 66 } < Payback::Reached { days: 90 });
    }

    #[test]
    fn test_payback_months_use_average_month() {
        let payback = Payback::Reached { days: 66 };
        assert_eq!(payback.months(), Some(dec!(2.1682)));
        assert_eq!(Payback::Unreached.months(), None);
    }

    #[test]
    fn test_payback_serialises_with_status_tag() {
        let json = serde_json::to_value(Payback::Reached { days: 12 }).unwrap();
        assert_eq!(json["status"], "reached");
        assert_eq!(json["days"], 12);

        let json = serde_json::to_value(Payback::Unreached).unwrap();
        assert_eq!(json["status"], "unreached");
    }
}
