//! Derived read-only views over server data.
//!
//! No independent state machines here: overview tiles and the jobs report
//! are pure read-throughs that refresh on a coarse event set.

mod overview;
mod reports;

pub use overview::{Overview, OverviewCounts};
pub use reports::{
    CustomerVolume, DailyVolume, JobsReport, MonthlyVolume, ReportTotals, Reports,
    MAX_WINDOW_DAYS, MIN_WINDOW_DAYS,
};

use crate::bus::envelope::kinds;

/// Coarse relevance shared by the derived views: any entity event or the
/// global refresh re-derives everything. Counts and snapshot fetches are
/// cheap, and "approximately current" is the bar here.
pub fn is_coarse_refresh(kind: &str) -> bool {
    kind.starts_with("job.")
        || kind.starts_with("driver.")
        || kind.starts_with("vehicle.")
        || kind == kinds::OPS_REFRESH
}
