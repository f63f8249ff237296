pub mod catalog;
pub mod profile;

pub use catalog::SiteCatalog;
pub use profile::{MonthlyRevenue, RevenueProfile, SiteYearData};
