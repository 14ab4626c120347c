use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config;

fn app_time_zone() -> Tz {
    config::current().time_zone.parse().unwrap_or(Tz::UTC)
}

pub fn format_datetime_in(value: &DateTime<Utc>, tz: Tz) -> String {
    value.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    format_datetime_in(value, app_time_zone())
}

pub fn format_date(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Parses the value of an `<input type="date">`; blank means unset.
pub fn parse_date_input(value: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Invalid date: {}", trimmed))
}

pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}
