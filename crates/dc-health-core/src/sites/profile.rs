use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, MONTH_LENGTHS};
use crate::error::DcHealthError;
use crate::types::{MegawattHours, Money};
use crate::DcHealthResult;

const MONTHS: usize = 12;

/// Raw monthly figures for one site and year, as they appear in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteYearData {
    /// Revenue per calendar month, January first
    pub monthly_revenue: Vec<Money>,
    /// Metered production per calendar month, January first
    pub monthly_production_mwh: Vec<MegawattHours>,
}

/// One row of a revenue profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: u32,
    pub days: u32,
    pub revenue: Money,
    pub production_mwh: MegawattHours,
    pub per_day_rate: Money,
}

/// Validated twelve-month revenue profile of a site in a given year.
///
/// Production figures are carried for reporting; only revenue feeds the
/// payback calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SiteYearData", into = "SiteYearData")]
pub struct RevenueProfile {
    monthly_revenue: [Money; MONTHS],
    monthly_production_mwh: [MegawattHours; MONTHS],
    per_day_rate: [Money; MONTHS],
    annual_revenue: Money,
    annual_production_mwh: MegawattHours,
}

impl RevenueProfile {
    pub fn new(
        monthly_revenue: Vec<Money>,
        monthly_production_mwh: Vec<MegawattHours>,
    ) -> DcHealthResult<Self> {
        let monthly_revenue = twelve_non_negative("monthly_revenue", monthly_revenue)?;
        let monthly_production_mwh =
            twelve_non_negative("monthly_production_mwh", monthly_production_mwh)?;

        let mut per_day_rate = [Decimal::ZERO; MONTHS];
        for (i, rate) in per_day_rate.iter_mut().enumerate() {
            *rate = monthly_revenue[i] / Decimal::from(MONTH_LENGTHS[i]);
        }
        let annual_revenue = checked_total("monthly_revenue", &monthly_revenue)?;
        let annual_production_mwh =
            checked_total("monthly_production_mwh", &monthly_production_mwh)?;

        Ok(Self {
            monthly_revenue,
            monthly_production_mwh,
            per_day_rate,
            annual_revenue,
            annual_production_mwh,
        })
    }

    pub fn monthly_revenue(&self) -> &[Money; MONTHS] {
        &self.monthly_revenue
    }

    pub fn monthly_production_mwh(&self) -> &[MegawattHours; MONTHS] {
        &self.monthly_production_mwh
    }

    /// Revenue per day for each month, January first.
    pub fn per_day_rate(&self) -> &[Money; MONTHS] {
        &self.per_day_rate
    }

    /// Per-day revenue rate in effect on `date`.
    pub fn per_day_rate_on(&self, date: NaiveDate) -> Money {
        self.per_day_rate[calendar::month_index(date)]
    }

    pub fn annual_revenue(&self) -> Money {
        self.annual_revenue
    }

    pub fn annual_production_mwh(&self) -> MegawattHours {
        self.annual_production_mwh
    }

    pub fn months(&self) -> Vec<MonthlyRevenue> {
        (0..MONTHS)
            .map(|i| MonthlyRevenue {
                month: i as u32 + 1,
                days: MONTH_LENGTHS[i],
                revenue: self.monthly_revenue[i],
                production_mwh: self.monthly_production_mwh[i],
                per_day_rate: self.per_day_rate[i],
            })
            .collect()
    }
}

fn twelve_non_negative(field: &str, values: Vec<Decimal>) -> DcHealthResult<[Decimal; MONTHS]> {
    let values: [Decimal; MONTHS] = values.try_into().map_err(|v: Vec<Decimal>| {
        DcHealthError::InvalidProfile(format!(
            "{field} must have exactly {MONTHS} entries, got {}",
            v.len()
        ))
    })?;
    if let Some(pos) = values.iter().position(|v| *v < Decimal::ZERO) {
        return Err(DcHealthError::InvalidProfile(format!(
            "{field} entry for month {} is negative ({})",
            pos + 1,
            values[pos]
        )));
    }
    Ok(values)
}

fn checked_total(field: &str, values: &[Decimal; MONTHS]) -> DcHealthResult<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |total, v| total.checked_add(*v))
        .ok_or_else(|| {
            DcHealthError::InvalidProfile(format!("{field} annual total is out of range"))
        })
}

impl TryFrom<SiteYearData> for RevenueProfile {
    type Error = DcHealthError;

    fn try_from(data: SiteYearData) -> Result<Self, Self::Error> {
        RevenueProfile::new(data.monthly_revenue, data.monthly_production_mwh)
    }
}

impl From<RevenueProfile> for SiteYearData {
    fn from(profile: RevenueProfile) -> Self {
        SiteYearData {
            monthly_revenue: profile.monthly_revenue.to_vec(),
            monthly_production_mwh: profile.monthly_production_mwh.to_vec(),
        }
    }
}
