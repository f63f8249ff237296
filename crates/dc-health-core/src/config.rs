use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DcHealthError;
use crate::sites::SiteCatalog;
use crate::types::{Kilowatts, Money};
use crate::DcHealthResult;

// ---------------------------------------------------------------------------
// Crew
// ---------------------------------------------------------------------------

/// Field crew staffing, timing and rates used by the repair cost estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewParameters {
    /// Technicians dispatched together
    pub team_size: u32,
    /// Length of a working day in minutes
    pub workday_minutes: u32,
    /// Round-trip travel to site, paid every crew day
    pub travel_minutes_per_day: u32,
    /// Safety briefing and lock-out, paid every crew day
    pub safety_minutes_per_day: u32,
    /// Loaded labour rate per technician hour
    pub labor_rate_per_hour: Money,
    /// Travel expense per technician per crew day
    pub travel_cost_per_day: Money,
    /// Time to locate a failed string
    pub locate_minutes_per_string: u32,
    /// Time to repair a located string
    pub repair_minutes_per_string: u32,
    /// Diagnostic time per combiner box
    pub diag_minutes_per_box: u32,
    /// Strings aggregated by one combiner box
    pub strings_per_combiner_box: u32,
}

impl Default for CrewParameters {
    fn default() -> Self {
        Self {
            team_size: 2,
            workday_minutes: 480,
            travel_minutes_per_day: 240,
            safety_minutes_per_day: 15,
            labor_rate_per_hour: dec!(130.44),
            travel_cost_per_day: dec!(75),
            locate_minutes_per_string: 30,
            repair_minutes_per_string: 45,
            diag_minutes_per_box: 30,
            strings_per_combiner_box: 5,
        }
    }
}

impl CrewParameters {
    /// Minutes lost every crew day before any repair work starts.
    pub fn fixed_minutes_per_day(&self) -> u32 {
        self.travel_minutes_per_day
            .saturating_add(self.safety_minutes_per_day)
    }

    /// Minutes per technician per day left for diagnosis and repair.
    pub fn variable_minutes_per_day(&self) -> DcHealthResult<u32> {
        let fixed = self.fixed_minutes_per_day();
        match self.workday_minutes.checked_sub(fixed) {
            Some(minutes) if minutes > 0 => Ok(minutes),
            _ => Err(DcHealthError::Configuration(format!(
                "workday of {} minutes leaves no working time after {} fixed minutes",
                self.workday_minutes, fixed
            ))),
        }
    }

    pub fn validate(&self) -> DcHealthResult<()> {
        if self.team_size == 0 {
            return Err(DcHealthError::Configuration(
                "team_size must be at least 1".into(),
            ));
        }
        if self.strings_per_combiner_box == 0 {
            return Err(DcHealthError::Configuration(
                "strings_per_combiner_box must be at least 1".into(),
            ));
        }
        if self.labor_rate_per_hour < Decimal::ZERO {
            return Err(DcHealthError::Configuration(
                "labor_rate_per_hour cannot be negative".into(),
            ));
        }
        if self.travel_cost_per_day < Decimal::ZERO {
            return Err(DcHealthError::Configuration(
                "travel_cost_per_day cannot be negative".into(),
            ));
        }
        self.variable_minutes_per_day()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Plant
// ---------------------------------------------------------------------------

/// Nameplate ratings used to attribute plant revenue to a single string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantParameters {
    pub string_rated_kw: Kilowatts,
    pub plant_rated_kw: Kilowatts,
}

impl Default for PlantParameters {
    fn default() -> Self {
        Self {
            string_rated_kw: dec!(5.6),
            plant_rated_kw: dec!(37970),
        }
    }
}

impl PlantParameters {
    /// Share of total plant output produced by one string.
    pub fn string_fraction(&self) -> DcHealthResult<Decimal> {
        self.validate()?;
        self.string_rated_kw
            .checked_div(self.plant_rated_kw)
            .ok_or_else(|| {
                DcHealthError::Configuration(format!(
                    "string share {} / {} is out of range",
                    self.string_rated_kw, self.plant_rated_kw
                ))
            })
    }

    pub fn validate(&self) -> DcHealthResult<()> {
        if self.plant_rated_kw <= Decimal::ZERO {
            return Err(DcHealthError::Configuration(format!(
                "plant_rated_kw must be positive, got {}",
                self.plant_rated_kw
            )));
        }
        if self.string_rated_kw < Decimal::ZERO {
            return Err(DcHealthError::Configuration(format!(
                "string_rated_kw cannot be negative, got {}",
                self.string_rated_kw
            )));
        }
        if self.string_rated_kw > self.plant_rated_kw {
            return Err(DcHealthError::Configuration(format!(
                "string_rated_kw ({}) cannot exceed plant_rated_kw ({})",
                self.string_rated_kw, self.plant_rated_kw
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Horizons
// ---------------------------------------------------------------------------

/// Simulation horizons and sweep sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonParameters {
    /// Days simulated after each dispatch when looking for payback
    pub curve_horizon_days: u32,
    /// Exclusive upper bound on the dispatch delay scanned by the date search
    pub max_dispatch_delay_days: u32,
    /// Largest string count in the repair cost and payback curves
    pub curve_max_strings: u32,
}

impl Default for HorizonParameters {
    fn default() -> Self {
        Self {
            curve_horizon_days: 730,
            max_dispatch_delay_days: 365,
            curve_max_strings: 100,
        }
    }
}

impl HorizonParameters {
    pub fn validate(&self) -> DcHealthResult<()> {
        if self.curve_horizon_days == 0 {
            return Err(DcHealthError::Configuration(
                "curve_horizon_days must be at least 1".into(),
            ));
        }
        if self.max_dispatch_delay_days == 0 {
            return Err(DcHealthError::Configuration(
                "max_dispatch_delay_days must be at least 1".into(),
            ));
        }
        if self.curve_max_strings == 0 {
            return Err(DcHealthError::Configuration(
                "curve_max_strings must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Every tunable the calculations read. Built once and passed by reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub crew: CrewParameters,
    pub plant: PlantParameters,
    pub horizon: HorizonParameters,
}

impl ModelConfig {
    pub fn validate(&self) -> DcHealthResult<()> {
        self.crew.validate()?;
        self.plant.validate()?;
        self.horizon.validate()
    }
}

/// On-disk configuration document: model parameters plus the site catalog.
///
/// Missing sections fall back to the defaults and the built-in catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcHealthConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default = "SiteCatalog::builtin")]
    pub sites: SiteCatalog,
}

impl Default for DcHealthConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            sites: SiteCatalog::builtin(),
        }
    }
}

impl DcHealthConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> DcHealthResult<Self> {
        let config: DcHealthConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DcHealthResult<()> {
        self.model.validate()?;
        if self.sites.is_empty() {
            return Err(DcHealthError::Configuration(
                "site catalog contains no revenue profiles".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_crew_fixed_and_variable_minutes() {
        let crew = CrewParameters::default();
        assert_eq!(crew.fixed_minutes_per_day(), 255);
        assert_eq!(crew.variable_minutes_per_day().unwrap(), 225);
        assert!(crew.validate().is_ok());
    }

    #[test]
    fn test_workday_consumed_by_fixed_time_is_configuration_error() {
        let crew = CrewParameters {
            workday_minutes: 255,
            ..CrewParameters::default()
        };
        assert!(matches!(
            crew.variable_minutes_per_day(),
            Err(DcHealthError::Configuration(_))
        ));

        let crew = CrewParameters {
            travel_minutes_per_day: 600,
            ..CrewParameters::default()
        };
        assert!(matches!(crew.validate(), Err(DcHealthError::Configuration(_))));
    }

    #[test]
    fn test_zero_team_is_configuration_error() {
        let crew = CrewParameters {
            team_size: 0,
            ..CrewParameters::default()
        };
        assert!(matches!(crew.validate(), Err(DcHealthError::Configuration(_))));
    }

    #[test]
    fn test_zero_plant_rating_is_configuration_error() {
        let plant = PlantParameters {
            plant_rated_kw: Decimal::ZERO,
            ..PlantParameters::default()
        };
        assert!(matches!(
            plant.string_fraction(),
            Err(DcHealthError::Configuration(_))
        ));
    }

    #[test]
    fn test_string_rated_above_plant_is_configuration_error() {
        let plant = PlantParameters {
            string_rated_kw: dec!(10),
            plant_rated_kw: dec!(5),
        };
        assert!(matches!(plant.validate(), Err(DcHealthError::Configuration(_))));

        let result = DcHealthConfig::from_json_str(
            r#"{"model": {"plant": {"string_rated_kw": "10000000000000000000", "plant_rated_kw": "0.0000000001"}}}"#,
        );
        assert!(matches!(result, Err(DcHealthError::Configuration(_))));
    }

    #[test]
    fn test_string_share_of_tiny_plant_stays_in_range() {
        let plant = PlantParameters {
            string_rated_kw: dec!(0.0000000001),
            plant_rated_kw: dec!(0.0000000001),
        };
        assert_eq!(plant.string_fraction().unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = DcHealthConfig::from_json_str(r#"{"model": {"crew": {"team_size": 3}}}"#)
            .unwrap();
        assert_eq!(config.model.crew.team_size, 3);
        assert_eq!(config.model.crew.workday_minutes, 480);
        assert_eq!(config.model.horizon, HorizonParameters::default());
        assert!(config.sites.get("McKenzie", 2025).is_ok());
    }

    #[test]
    fn test_degenerate_json_config_is_rejected() {
        let result =
            DcHealthConfig::from_json_str(r#"{"model": {"crew": {"workday_minutes": 200}}}"#);
        assert!(matches!(result, Err(DcHealthError::Configuration(_))));
    }
}
