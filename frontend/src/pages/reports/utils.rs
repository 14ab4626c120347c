use crate::api::{ApiError, ExpenseStatus, ReportGrouping, ReportQuery};
use crate::utils::time::parse_date_input;
use leptos::*;
use serde_json::{json, Map, Value};

pub const GROUPINGS: [ReportGrouping; 4] = [
    ReportGrouping::Category,
    ReportGrouping::Vendor,
    ReportGrouping::Month,
    ReportGrouping::Status,
];

pub fn grouping_label(grouping: ReportGrouping) -> &'static str {
    match grouping {
        ReportGrouping::Category => "Category",
        ReportGrouping::Vendor => "Vendor",
        ReportGrouping::Month => "Month",
        ReportGrouping::Status => "Status",
    }
}

pub fn parse_grouping(value: &str) -> ReportGrouping {
    GROUPINGS
        .into_iter()
        .find(|g| g.as_str() == value)
        .unwrap_or_default()
}

#[derive(Clone, Copy)]
pub struct ReportFilterState {
    pub from: RwSignal<String>,
    pub to: RwSignal<String>,
    pub group_by: RwSignal<ReportGrouping>,
    pub status: RwSignal<String>,
}

impl Default for ReportFilterState {
    fn default() -> Self {
        Self {
            from: create_rw_signal(String::new()),
            to: create_rw_signal(String::new()),
            group_by: create_rw_signal(ReportGrouping::default()),
            status: create_rw_signal(String::new()),
        }
    }
}

impl ReportFilterState {
    /// Builds the query, rejecting malformed dates and reversed ranges.
    pub fn to_query(&self) -> Result<ReportQuery, ApiError> {
        let mut fields = Map::new();
        let from = parse_date_input(&self.from.get_untracked()).unwrap_or_else(|msg| {
            fields.insert("from".into(), Value::from(msg));
            None
        });
        let to = parse_date_input(&self.to.get_untracked()).unwrap_or_else(|msg| {
            fields.insert("to".into(), Value::from(msg));
            None
        });
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                fields.insert("to".into(), Value::from("End date must not be before the start date."));
            }
        }
        if !fields.is_empty() {
            return Err(ApiError::validation("Please check the report filters.")
                .with_details(json!({ "fields": fields })));
        }
        Ok(ReportQuery {
            from,
            to,
            group_by: self.group_by.get_untracked(),
            status: ExpenseStatus::parse(&self.status.get_untracked()),
        })
    }
}

/// Share of the grand total, as a whole percentage.
pub fn row_share(amount: f64, total: f64) -> u32 {
    if total <= 0.0 {
        return 0;
    }
    ((amount / total) * 100.0).round().clamp(0.0, 100.0) as u32
}
