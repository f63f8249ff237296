pub mod crossover;
pub mod dispatch;
pub mod fixed_start;
pub mod query;
pub mod stream;

pub use crossover::{crossover_series, CrossoverSeries, SeriesRow};
pub use dispatch::{
    earliest_dispatch_meeting_target, DispatchPlan, DispatchSearchInput, DispatchSearchOutcome,
};
pub use fixed_start::{
    payback_curve, payback_curve_with_costs, payback_for_fixed_start, FixedStartInput,
    PaybackCurve, PaybackCurvePoint, PaybackSummary,
};
pub use query::PaybackQuery;
pub use stream::{first_crossing, DailyRevenue, DailyRevenueIter, DailyRevenueStream};
