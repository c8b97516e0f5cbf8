use crate::error::Result;
use crate::util::parse_date_input;
use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};

const LAST_SECOND_OF_DAY: i64 = 24 * 60 * 60 - 1;

/// Inclusive aggregation window. `end` runs through 23:59:59 of its day.
///
/// `start <= end` is not enforced. An inverted window only matches weeks that
/// straddle both bounds, which in practice means none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        let start = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
        let end = Utc.from_utc_datetime(&end.and_time(NaiveTime::MIN))
            + Duration::seconds(LAST_SECOND_OF_DAY);
        Self { start, end }
    }

    /// Build a window from optional user input. The end defaults to `today`.
    /// A missing start is the end instant (23:59:59) minus one calendar month,
    /// clamped to the last day of a shorter month; an explicit start begins at
    /// 00:00:00.
    pub fn resolve(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> Result<Self> {
        let end_date = match end.filter(|s| !s.trim().is_empty()) {
            Some(e) => parse_date_input(e, today)?,
            None => today,
        };
        let window = match start.filter(|s| !s.trim().is_empty()) {
            Some(s) => Self::from_dates(parse_date_input(s, today)?, end_date),
            None => Self::month_ending(end_date),
        };

        if window.is_inverted() {
            tracing::warn!(
                start = %window.start_date(),
                end = %window.end_date(),
                "start date is after end date; the window will match little or nothing"
            );
        }
        Ok(window)
    }

    fn month_ending(end_date: NaiveDate) -> Self {
        let end = Self::from_dates(end_date, end_date).end;
        let start = end.checked_sub_months(Months::new(1)).unwrap_or(end);
        Self { start, end }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::overlaps;
    use crate::model::WeekBucket;
    use pretty_assertions::assert_eq;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_is_inclusive_through_last_second() {
        let w = DateWindow::from_dates(day(2024, 1, 1), day(2024, 1, 31));
        assert_eq!(w.start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(w.end.to_rfc3339(), "2024-01-31T23:59:59+00:00");
        assert_eq!(w.start_date(), day(2024, 1, 1));
        assert_eq!(w.end_date(), day(2024, 1, 31));
    }

    #[test]
    fn defaults_to_one_month_ending_today() {
        let w = DateWindow::resolve(None, None, day(2024, 3, 31)).unwrap();
        assert_eq!(w.start.to_rfc3339(), "2024-02-29T23:59:59+00:00");
        assert_eq!(w.end.to_rfc3339(), "2024-03-31T23:59:59+00:00");
    }

    #[test]
    fn explicit_start_begins_at_midnight() {
        let w = DateWindow::resolve(Some("2024-01-07"), Some("2024-02-07"), day(2025, 1, 1)).unwrap();
        assert_eq!(w.start.to_rfc3339(), "2024-01-07T00:00:00+00:00");
    }

    #[test]
    fn default_start_excludes_week_ending_on_its_day() {
        // 2023-12-31 is a Sunday; its week ends at 2024-01-07T00:00:00.
        let sunday_week = WeekBucket {
            week_start: Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap().timestamp(),
            additions: 5,
            deletions: 0,
            commits: 1,
        };

        let defaulted = DateWindow::resolve(None, Some("2024-02-07"), day(2025, 1, 1)).unwrap();
        assert_eq!(defaulted.start.to_rfc3339(), "2024-01-07T23:59:59+00:00");
        assert!(!overlaps(&sunday_week, &defaulted));

        let explicit =
            DateWindow::resolve(Some("2024-01-07"), Some("2024-02-07"), day(2025, 1, 1)).unwrap();
        assert!(overlaps(&sunday_week, &explicit));
    }

    #[test]
    fn default_start_follows_explicit_end() {
        let w = DateWindow::resolve(None, Some("2024-06-15"), day(2025, 1, 1)).unwrap();
        assert_eq!(w.start_date(), day(2024, 5, 15));
    }

    #[test]
    fn blank_input_means_default() {
        let w = DateWindow::resolve(Some("  "), Some(""), day(2024, 3, 10)).unwrap();
        assert_eq!(w.end_date(), day(2024, 3, 10));
        assert_eq!(w.start_date(), day(2024, 2, 10));
    }

    #[test]
    fn inverted_window_is_accepted() {
        let w = DateWindow::resolve(Some("2024-02-01"), Some("2024-01-01"), day(2024, 3, 1)).unwrap();
        assert!(w.is_inverted());
    }

    #[test]
    fn invalid_date_is_an_error() {
        assert!(DateWindow::resolve(Some("01/02/2024"), None, day(2024, 3, 1)).is_err());
    }
}
