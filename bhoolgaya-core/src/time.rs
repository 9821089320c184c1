//! Time utilities: calendar-day arithmetic in an explicit timezone.
//!
//! Ages are counted in local calendar days (midnight to midnight), never in
//! rolling 24h windows. Nothing here reads the system clock; callers pass
//! "now" in, usually bundled in a [`Calendar`].

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::EngineError;

/// Parse an IANA timezone name like "Asia/Kolkata".
pub fn parse_timezone(tz: &str) -> Result<Tz, EngineError> {
    tz.parse()
        .map_err(|_| EngineError::InvalidTimezone(tz.to_string()))
}

/// Parse a local time like "2026-02-20 23:59" in `tz`, returning UTC.
pub fn parse_local_datetime_to_utc(local: &str, tz: Tz) -> Result<DateTime<Utc>, EngineError> {
    let ndt = NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M")
        .map_err(|e| EngineError::InvalidLocalTime(format!("'{local}': {e}")))?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| EngineError::InvalidLocalTime(format!("ambiguous or skipped (DST?): {local} {tz}")))?;

    Ok(local_dt.with_timezone(&Utc))
}

/// Resolve a wall-clock time to an instant, stepping forward over DST gaps.
fn resolve_local(tz: Tz, ndt: NaiveDateTime) -> DateTime<Utc> {
    let mut candidate = ndt;
    // Gaps are at most a couple of hours; a day of 15-minute steps always lands.
    for _ in 0..(24 * 4) {
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            return dt.with_timezone(&Utc);
        }
        candidate += Duration::minutes(15);
    }
    Utc.from_utc_datetime(&ndt)
}

/// Local calendar date of an instant.
pub fn local_date(at: DateTime<Utc>, tz: Tz) -> NaiveDate {
    at.with_timezone(&tz).date_naive()
}

/// Local midnight at the start of the day containing `at`.
pub fn start_of_day(at: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    resolve_local(tz, local_date(at, tz).and_time(NaiveTime::MIN))
}

/// Last millisecond of the local day containing `at`.
pub fn end_of_day(at: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let next = local_date(at, tz) + Duration::days(1);
    resolve_local(tz, next.and_time(NaiveTime::MIN)) - Duration::milliseconds(1)
}

pub fn is_same_day(a: DateTime<Utc>, b: DateTime<Utc>, tz: Tz) -> bool {
    local_date(a, tz) == local_date(b, tz)
}

/// Signed number of local calendar days from `from` to `to`.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>, tz: Tz) -> i64 {
    (local_date(to, tz) - local_date(from, tz)).num_days()
}

/// Whole calendar days elapsed since `original_date`, clamped at 0.
pub fn age_in_days(original_date: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> u32 {
    let days = days_between(original_date, now, tz).max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Move `at` by `days` local calendar days, keeping its local wall-clock time.
pub fn add_days(at: DateTime<Utc>, days: i64, tz: Tz) -> DateTime<Utc> {
    let local = at.with_timezone(&tz).naive_local();
    resolve_local(tz, local + Duration::days(days))
}

/// An injected "now" plus the timezone its day boundaries are taken in.
///
/// One classification pass uses one `Calendar`, so a pass that runs across
/// midnight still sees a single "today".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calendar {
    now: DateTime<Utc>,
    tz: Tz,
}

impl Calendar {
    pub fn new(now: DateTime<Utc>, tz: Tz) -> Self {
        Self { now, tz }
    }

    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Tz::UTC)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn today(&self) -> NaiveDate {
        local_date(self.now, self.tz)
    }

    pub fn start_of_today(&self) -> DateTime<Utc> {
        start_of_day(self.now, self.tz)
    }

    pub fn age_of(&self, original_date: DateTime<Utc>) -> u32 {
        age_in_days(original_date, self.now, self.tz)
    }

    pub fn local(&self, at: DateTime<Utc>) -> DateTime<Tz> {
        at.with_timezone(&self.tz)
    }
}

/// Human label for a date relative to today ("Today", "Tomorrow", "3 days ago", ...).
pub fn relative_date_label(date: DateTime<Utc>, calendar: &Calendar) -> String {
    let diff = days_between(calendar.now(), date, calendar.tz());
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        2..=7 => format!("In {diff} days"),
        -7..=-2 => format!("{} days ago", diff.abs()),
        _ => format_date(date, calendar.tz()),
    }
}

/// "Feb 5, 2026" in local time.
pub fn format_date(date: DateTime<Utc>, tz: Tz) -> String {
    date.with_timezone(&tz).format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kolkata() -> Tz {
        parse_timezone("Asia/Kolkata").unwrap()
    }

    #[test]
    fn test_parse_chicago_local_time() {
        // Feb is CST (UTC-6)
        let utc = parse_local_datetime_to_utc("2026-02-20 23:59", chrono_tz::America::Chicago).unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-21T05:59:00+00:00");
    }

    #[test]
    fn rejects_unknown_timezone() {
        assert_eq!(
            parse_timezone("Mars/Olympus"),
            Err(EngineError::InvalidTimezone("Mars/Olympus".to_string()))
        );
    }

    #[test]
    fn one_minute_across_midnight_is_one_day() {
        let tz = kolkata();
        let created = parse_local_datetime_to_utc("2026-02-05 23:59", tz).unwrap();
        let checked = parse_local_datetime_to_utc("2026-02-06 00:00", tz).unwrap();
        assert_eq!(age_in_days(created, checked, tz), 1);
    }

    #[test]
    fn twenty_three_hours_same_day_is_zero() {
        let tz = kolkata();
        let created = parse_local_datetime_to_utc("2026-02-05 00:30", tz).unwrap();
        let checked = parse_local_datetime_to_utc("2026-02-05 23:30", tz).unwrap();
        assert_eq!(age_in_days(created, checked, tz), 0);
    }

    #[test]
    fn future_original_date_clamps_to_zero() {
        let now = Utc.with_ymd_and_hms(2026, 2, 5, 12, 0, 0).unwrap();
        let future = now + Duration::days(4);
        assert_eq!(age_in_days(future, now, Tz::UTC), 0);
        assert_eq!(days_between(future, now, Tz::UTC), -4);
        assert_eq!(age_in_days(now, now, Tz::UTC), 0);
    }

    #[test]
    fn day_boundary_depends_on_timezone() {
        // 20:00 UTC on Feb 5 is already Feb 6 in Kolkata (UTC+5:30).
        let original = Utc.with_ymd_and_hms(2026, 2, 5, 10, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 2, 5, 20, 0, 0).unwrap();
        assert_eq!(age_in_days(original, now, Tz::UTC), 0);
        assert_eq!(age_in_days(original, now, kolkata()), 1);
    }

    #[test]
    fn dst_change_does_not_skew_day_count() {
        let tz = chrono_tz::America::Chicago;
        // DST starts 2026-03-08 in the US.
        let before = parse_local_datetime_to_utc("2026-03-07 12:00", tz).unwrap();
        let after = parse_local_datetime_to_utc("2026-03-09 00:10", tz).unwrap();
        assert_eq!(age_in_days(before, after, tz), 2);
    }

    #[test]
    fn start_and_end_of_day_bracket_the_local_day() {
        let tz = kolkata();
        let at = parse_local_datetime_to_utc("2026-02-05 15:45", tz).unwrap();
        let start = start_of_day(at, tz);
        let end = end_of_day(at, tz);
        assert_eq!(start.to_rfc3339(), "2026-02-04T18:30:00+00:00");
        assert_eq!(end - start, Duration::days(1) - Duration::milliseconds(1));
        assert!(is_same_day(start, end, tz));
        assert!(!is_same_day(start, end + Duration::milliseconds(1), tz));
    }

    #[test]
    fn add_days_keeps_wall_clock_time() {
        let tz = chrono_tz::America::Chicago;
        let at = parse_local_datetime_to_utc("2026-03-07 09:00", tz).unwrap();
        let moved = add_days(at, 2, tz);
        assert_eq!(moved.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string(), "2026-03-09 09:00");
    }

    #[test]
    fn relative_labels() {
        let now = Utc.with_ymd_and_hms(2026, 2, 5, 12, 0, 0).unwrap();
        let cal = Calendar::utc(now);
        assert_eq!(relative_date_label(now, &cal), "Today");
        assert_eq!(relative_date_label(now + Duration::days(1), &cal), "Tomorrow");
        assert_eq!(relative_date_label(now - Duration::days(1), &cal), "Yesterday");
        assert_eq!(relative_date_label(now + Duration::days(3), &cal), "In 3 days");
        assert_eq!(relative_date_label(now - Duration::days(7), &cal), "7 days ago");
        assert_eq!(relative_date_label(now + Duration::days(30), &cal), "Mar 7, 2026");
    }
}
