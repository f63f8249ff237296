pub mod payback;
pub mod repair;
pub mod sites;

use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use dc_health_core::payback::PaybackQuery;
use dc_health_core::with_metadata;

use crate::input;

const DEFAULT_STRINGS_DOWN: u32 = 20;

/// Site, date and dispatch selection shared by the payback commands
#[derive(Args)]
pub struct QueryArgs {
    /// Site name from the catalog
    #[arg(long, default_value = "McKenzie")]
    pub site: String,

    /// Revenue year of the site
    #[arg(long, default_value_t = 2025)]
    pub year: i32,

    /// Month of the selected date (1-12)
    #[arg(long, default_value_t = 5)]
    pub month: u32,

    /// Day of the selected date
    #[arg(long, default_value_t = 15)]
    pub day: u32,

    /// Days between the selected date and crew arrival (0-30)
    #[arg(long, default_value_t = 0)]
    pub delay: u32,

    /// Path to JSON query file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl QueryArgs {
    /// Build the query from `--input`, piped stdin, or the flags, in that order.
    ///
    /// `strings_down` and `target_payback_months` are only `Some` when passed
    /// on the command line; they then override a loaded query.
    pub fn resolve(
        &self,
        strings_down: Option<u32>,
        target_payback_months: Option<Decimal>,
    ) -> Result<PaybackQuery, Box<dyn std::error::Error>> {
        let loaded = if let Some(ref path) = self.input {
            Some(input::file::read_json(path)?)
        } else {
            input::stdin::read_stdin()?
        };
        let query = match loaded {
            Some(query) => overlay_flags(query, strings_down, target_payback_months),
            None => PaybackQuery {
                site: self.site.clone(),
                year: self.year,
                month: self.month,
                day: self.day,
                strings_down: strings_down.unwrap_or(DEFAULT_STRINGS_DOWN),
                dispatch_delay_days: self.delay,
                target_payback_months,
            },
        };
        query.validate()?;
        Ok(query)
    }
}

fn overlay_flags(
    mut query: PaybackQuery,
    strings_down: Option<u32>,
    target_payback_months: Option<Decimal>,
) -> PaybackQuery {
    if let Some(strings) = strings_down {
        if strings != query.strings_down {
            tracing::info!(
                from = query.strings_down,
                to = strings,
                "--strings overrides loaded query"
            );
        }
        query.strings_down = strings;
    }
    if let Some(target) = target_payback_months {
        query.target_payback_months = Some(target);
    }
    query
}

/// Wrap a result in the standard output envelope.
pub fn envelope<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    started: Instant,
    result: T,
) -> Result<Value, Box<dyn std::error::Error>> {
    let elapsed = started.elapsed().as_micros() as u64;
    let output = with_metadata(methodology, assumptions, warnings, elapsed, result);
    Ok(serde_json::to_value(output)?)
}
