mod recent;
mod summary;

pub use recent::RecentExpenses;
pub use summary::{StatusBreakdown, SummarySection};
