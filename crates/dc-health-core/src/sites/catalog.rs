use std::collections::BTreeMap;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DcHealthError;
use crate::sites::profile::RevenueProfile;
use crate::DcHealthResult;

/// Revenue profiles keyed by site name and year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteCatalog {
    sites: BTreeMap<String, BTreeMap<i32, RevenueProfile>>,
}

impl SiteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the sites metered in the 2025 revenue export.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        // Figures are literal and twelve entries long, so construction cannot fail.
        let profiles = [
            (
                "McKenzie",
                2025,
                vec![
                    dec!(272803.51), dec!(355176.29), dec!(523682.78), dec!(652686.87),
                    dec!(754675.75), dec!(1531734.07), dec!(1590784.93), dec!(1453134.10),
                    dec!(1082549.32), dec!(549349.73), dec!(338379.46), dec!(247321.94),
                ],
                vec![
                    dec!(2037.21722), dec!(3376.4360016), dec!(3914.709997986),
                    dec!(6572.517997944), dec!(9148.466001012), dec!(8810.423007636),
                    dec!(8957.332998318), dec!(8403.698998662), dec!(7197.752998434),
                    dec!(5559.753996096), dec!(3375.548002026), dec!(2137.745999724),
                ],
            ),
            (
                "McKenzie",
                2026,
                vec![
                    dec!(280000.00), dec!(360000.00), dec!(530000.00), dec!(660000.00),
                    dec!(760000.00), dec!(1540000.00), dec!(1600000.00), dec!(1460000.00),
                    dec!(1090000.00), dec!(550000.00), dec!(340000.00), dec!(250000.00),
                ],
                vec![
                    dec!(2100.0), dec!(3400.0), dec!(4000.0), dec!(6600.0), dec!(9200.0),
                    dec!(8900.0), dec!(9000.0), dec!(8500.0), dec!(7300.0), dec!(5600.0),
                    dec!(3400.0), dec!(2200.0),
                ],
            ),
            (
                "AnotherSite",
                2025,
                vec![
                    dec!(200000), dec!(300000), dec!(450000), dec!(600000), dec!(700000),
                    dec!(1400000), dec!(1500000), dec!(1400000), dec!(1000000), dec!(500000),
                    dec!(300000), dec!(200000),
                ],
                vec![
                    dec!(1800), dec!(3000), dec!(3500), dec!(6000), dec!(8800), dec!(8500),
                    dec!(8700), dec!(8100), dec!(7000), dec!(5400), dec!(3200), dec!(2000),
                ],
            ),
        ];
        for (site, year, revenue, production) in profiles {
            if let Ok(profile) = RevenueProfile::new(revenue, production) {
                catalog.insert(site, year, profile);
            }
        }
        catalog
    }

    /// Add or replace the profile for a site and year.
    pub fn insert(&mut self, site: impl Into<String>, year: i32, profile: RevenueProfile) {
        self.sites
            .entry(site.into())
            .or_default()
            .insert(year, profile);
    }

    pub fn get(&self, site: &str, year: i32) -> DcHealthResult<&RevenueProfile> {
        let years = self.sites.get(site).ok_or_else(|| {
            DcHealthError::invalid_input(
                "site",
                format!(
                    "Unknown site '{site}'. Available: {}",
                    self.site_names().join(", ")
                ),
            )
        })?;
        years.get(&year).ok_or_else(|| {
            let available: Vec<String> = years.keys().map(|y| y.to_string()).collect();
            DcHealthError::invalid_input(
                "year",
                format!(
                    "No revenue profile for {site} in {year}. Available: {}",
                    available.join(", ")
                ),
            )
        })
    }

    pub fn site_names(&self) -> Vec<&str> {
        self.sites.keys().map(String::as_str).collect()
    }

    pub fn years(&self, site: &str) -> Vec<i32> {
        self.sites
            .get(site)
            .map(|years| years.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.values().all(BTreeMap::is_empty)
    }

    /// Number of site/year profiles held.
    pub fn len(&self) -> usize {
        self.sites.values().map(BTreeMap::len).sum()
    }
}
