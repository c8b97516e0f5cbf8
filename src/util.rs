use crate::error::{Result, StatsError};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolve a user-supplied date: RFC3339, YYYY-MM-DD, or "N days/weeks/months ago".
pub fn parse_date_input(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Ok(date);
    }

    if let Some(date) = parse_relative(input, today) {
        return Ok(date);
    }

    Err(StatsError::InvalidDate(format!(
        "'{input}' is not YYYY-MM-DD, RFC3339 or 'N days/weeks/months ago'"
    )))
}

fn parse_relative(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.to_lowercase();

    if let Some(days) = input.strip_suffix(" days ago") {
        let n: u64 = days.trim().parse().ok()?;
        return today.checked_sub_days(Days::new(n));
    }

    if let Some(weeks) = input.strip_suffix(" weeks ago") {
        let n: u64 = weeks.trim().parse().ok()?;
        return today.checked_sub_days(Days::new(n.checked_mul(7)?));
    }

    if let Some(months) = input.strip_suffix(" months ago") {
        let n: u32 = months.trim().parse().ok()?;
        return today.checked_sub_months(Months::new(n));
    }

    None
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day0(0).unwrap_or(date)
}
