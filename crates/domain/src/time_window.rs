use adminreports_core::{AppError, AppResult};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::qualifier::{QualOperator, Qualifier};

/// Timestamp layout the Admin Reports API expects for `startTime`/`endTime`.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Lookback applied when a query carries no time qualifier.
pub const DEFAULT_ACTIVITY_LOOKBACK_HOURS: i64 = 24;

/// Parses a literal in [`REPORT_TIMESTAMP_FORMAT`].
pub fn parse_report_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, REPORT_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|error| {
            AppError::Parse(format!(
                "time value '{value}' does not match YYYY-MM-DDTHH:MM:SS.mmmZ: {error}"
            ))
        })
}

/// Formats an instant in [`REPORT_TIMESTAMP_FORMAT`].
#[must_use]
pub fn format_report_timestamp(value: DateTime<Utc>) -> String {
    value.format(REPORT_TIMESTAMP_FORMAT).to_string()
}

/// Start/end bounds derived from the time qualifiers of one query.
///
/// Every qualifier narrows the window: the start is the latest lower bound
/// and the end the earliest upper bound. Strict comparisons move the bound
/// one second inward because the API bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Resolves the window for `qualifiers`, falling back to the trailing
    /// 24 hours before `now` when there are none.
    pub fn resolve(qualifiers: &[Qualifier], now: DateTime<Utc>) -> AppResult<Self> {
        if qualifiers.is_empty() {
            return Ok(Self {
                start: Some(now - Duration::hours(DEFAULT_ACTIVITY_LOOKBACK_HOURS)),
                end: None,
            });
        }

        let mut window = Self {
            start: None,
            end: None,
        };

        for qualifier in qualifiers {
            let given = parse_report_timestamp(qualifier.value())?;
            match qualifier.operator() {
                QualOperator::Gt => window.raise_start(shifted(qualifier, given, 1)?),
                QualOperator::Gte => window.raise_start(given),
                QualOperator::Eq => {
                    window.raise_start(given);
                    window.lower_end(given);
                }
                QualOperator::Lte => window.lower_end(given),
                QualOperator::Lt => window.lower_end(shifted(qualifier, given, -1)?),
            }
        }

        Ok(window)
    }

    fn raise_start(&mut self, bound: DateTime<Utc>) {
        self.start = Some(self.start.map_or(bound, |current| current.max(bound)));
    }

    fn lower_end(&mut self, bound: DateTime<Utc>) {
        self.end = Some(self.end.map_or(bound, |current| current.min(bound)));
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Returns the inclusive upper bound.
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Returns the formatted `startTime` parameter.
    #[must_use]
    pub fn start_time(&self) -> Option<String> {
        self.start.map(format_report_timestamp)
    }

    /// Returns the formatted `endTime` parameter.
    #[must_use]
    pub fn end_time(&self) -> Option<String> {
        self.end.map(format_report_timestamp)
    }

    /// Whether contradicting qualifiers left no instant in the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }
}

fn shifted(qualifier: &Qualifier, given: DateTime<Utc>, seconds: i64) -> AppResult<DateTime<Utc>> {
    given
        .checked_add_signed(Duration::seconds(seconds))
        .ok_or_else(|| {
            AppError::Parse(format!(
                "time value '{}' is out of range",
                qualifier.value()
            ))
        })
}

#[cfg(test)]
mod tests {
    use adminreports_core::AppError;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    use super::{TimeWindow, format_report_timestamp, parse_report_timestamp};
    use crate::qualifier::{QualOperator, Qualifier};

    const INSTANT: &str = "2024-03-01T10:00:00.000Z";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0)
            .single()
            .unwrap_or_else(|| unreachable!())
    }

    fn time_qualifier(operator: QualOperator, value: &str) -> Qualifier {
        Qualifier::new("time", operator, value).unwrap_or_else(|_| unreachable!())
    }

    fn window_for(qualifiers: &[Qualifier]) -> TimeWindow {
        let window = TimeWindow::resolve(qualifiers, now());
        assert!(window.is_ok());
        window.unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn greater_than_starts_one_second_after_value() {
        let window = window_for(&[time_qualifier(QualOperator::Gt, INSTANT)]);
        assert_eq!(window.start_time().as_deref(), Some("2024-03-01T10:00:01.000Z"));
        assert_eq!(window.end_time(), None);
    }

    #[test]
    fn greater_or_equal_starts_at_value() {
        let window = window_for(&[time_qualifier(QualOperator::Gte, INSTANT)]);
        assert_eq!(window.start_time().as_deref(), Some(INSTANT));
        assert_eq!(window.end_time(), None);
    }

    #[test]
    fn equality_pins_both_bounds() {
        let window = window_for(&[time_qualifier(QualOperator::Eq, INSTANT)]);
        assert_eq!(window.start_time().as_deref(), Some(INSTANT));
        assert_eq!(window.end_time().as_deref(), Some(INSTANT));
        assert!(!window.is_empty());
    }

    #[test]
    fn less_or_equal_ends_at_value() {
        let window = window_for(&[time_qualifier(QualOperator::Lte, INSTANT)]);
        assert_eq!(window.start_time(), None);
        assert_eq!(window.end_time().as_deref(), Some(INSTANT));
    }

    #[test]
    fn less_than_ends_one_second_before_value() {
        let window = window_for(&[time_qualifier(QualOperator::Lt, INSTANT)]);
        assert_eq!(window.start_time(), None);
        assert_eq!(window.end_time().as_deref(), Some("2024-03-01T09:59:59.000Z"));
    }

    #[test]
    fn no_qualifier_defaults_to_trailing_day() {
        let window = window_for(&[]);
        assert_eq!(window.start(), Some(now() - Duration::hours(24)));
        assert_eq!(window.end(), None);
    }

    #[test]
    fn default_window_tracks_wall_clock() {
        let before = Utc::now();
        let window = TimeWindow::resolve(&[], Utc::now()).unwrap_or_else(|_| unreachable!());
        let after = Utc::now();

        let start = window.start().unwrap_or_else(|| unreachable!());
        assert!(start >= before - Duration::hours(24) - Duration::seconds(1));
        assert!(start <= after - Duration::hours(24) + Duration::seconds(1));
    }

    #[test]
    fn range_qualifiers_intersect() {
        let window = window_for(&[
            time_qualifier(QualOperator::Gt, "2024-03-01T00:00:00.000Z"),
            time_qualifier(QualOperator::Gte, "2024-03-01T06:00:00.000Z"),
            time_qualifier(QualOperator::Lt, "2024-03-01T18:00:00.000Z"),
            time_qualifier(QualOperator::Lte, "2024-03-01T20:00:00.000Z"),
        ]);
        assert_eq!(window.start_time().as_deref(), Some("2024-03-01T06:00:00.000Z"));
        assert_eq!(window.end_time().as_deref(), Some("2024-03-01T17:59:59.000Z"));
    }

    #[test]
    fn contradicting_qualifiers_produce_empty_window() {
        let window = window_for(&[
            time_qualifier(QualOperator::Gt, "2024-03-02T00:00:00.000Z"),
            time_qualifier(QualOperator::Lt, "2024-03-01T00:00:00.000Z"),
        ]);
        assert!(window.is_empty());
    }

    #[test]
    fn malformed_literal_is_parse_error() {
        let result = TimeWindow::resolve(&[time_qualifier(QualOperator::Gt, "yesterday")], now());
        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[test]
    fn strict_bounds_past_representable_range_are_parse_errors() {
        let latest = "+262142-12-31T23:59:59.000Z";
        assert!(parse_report_timestamp(latest).is_ok());
        let after_latest = TimeWindow::resolve(&[time_qualifier(QualOperator::Gt, latest)], now());
        assert!(matches!(after_latest, Err(AppError::Parse(_))));

        let earliest = "-262143-01-01T00:00:00.000Z";
        assert!(parse_report_timestamp(earliest).is_ok());
        let before_earliest =
            TimeWindow::resolve(&[time_qualifier(QualOperator::Lt, earliest)], now());
        assert!(matches!(before_earliest, Err(AppError::Parse(_))));
    }

    #[test]
    fn timestamp_keeps_millisecond_precision() {
        let parsed = parse_report_timestamp("2024-03-01T10:00:00.245Z");
        assert!(parsed.is_ok());
        assert_eq!(
            format_report_timestamp(parsed.unwrap_or_else(|_| unreachable!())),
            "2024-03-01T10:00:00.245Z"
        );
    }

    proptest! {
        #[test]
        fn strict_bounds_sit_one_second_inside(seconds in 0_i64..4_000_000_000) {
            let instant = DateTime::<Utc>::from_timestamp(seconds, 0)
                .unwrap_or_else(|| unreachable!());
            let literal = format_report_timestamp(instant);

            let lower = window_for(&[time_qualifier(QualOperator::Gt, &literal)]);
            let upper = window_for(&[time_qualifier(QualOperator::Lt, &literal)]);

            prop_assert_eq!(lower.start(), Some(instant + Duration::seconds(1)));
            prop_assert_eq!(upper.end(), Some(instant - Duration::seconds(1)));
        }
    }
}
