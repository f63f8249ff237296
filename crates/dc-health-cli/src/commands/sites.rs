use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;

use dc_health_core::DcHealthConfig;

use super::envelope;

/// Arguments for showing a revenue profile
#[derive(Args)]
pub struct ProfileArgs {
    /// Site name from the catalog
    #[arg(long, default_value = "McKenzie")]
    pub site: String,

    /// Revenue year of the site
    #[arg(long, default_value_t = 2025)]
    pub year: i32,
}

pub fn run_sites(config: &DcHealthConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let sites: Vec<Value> = config
        .sites
        .site_names()
        .into_iter()
        .map(|site| json!({ "site": site, "years": config.sites.years(site) }))
        .collect();
    envelope(
        "Site catalog listing",
        &json!({ "profiles": config.sites.len() }),
        Vec::new(),
        started,
        json!({ "sites": sites }),
    )
}

pub fn run_profile(
    args: ProfileArgs,
    config: &DcHealthConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let profile = config.sites.get(&args.site, args.year)?;
    envelope(
        "Monthly revenue spread over a 365-day year (February = 28 days)",
        &json!({ "site": args.site, "year": args.year }),
        Vec::new(),
        started,
        json!({
            "site": args.site,
            "year": args.year,
            "annual_revenue": profile.annual_revenue(),
            "annual_production_mwh": profile.annual_production_mwh(),
            "months": profile.months(),
        }),
    )
}
