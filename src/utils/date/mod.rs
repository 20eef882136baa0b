// Date utility functions
// Day-boundary and week helpers against the configured time zone.
//
// Entities carry absolute UTC instants; every day boundary is resolved in the
// caller's zone, the way the host supplies it. Adding minutes to a day anchor
// is elapsed-time addition (the grid works in elapsed-minutes-of-day); only
// the day boundaries themselves are calendar-aware.

use chrono::{DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve a naive local midnight to a concrete instant.
///
/// DST transitions can make midnight ambiguous (pick the earlier instant) or
/// nonexistent (walk forward in one-hour steps until a valid local time).
pub fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Utc> {
    let mut naive = date.and_hms_opt(0, 0, 0).unwrap();
    loop {
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earlier, _) => return earlier.with_timezone(&Utc),
            LocalResult::None => naive += Duration::hours(1),
        }
    }
}

pub fn is_same_day(date1: DateTime<Utc>, date2: DateTime<Utc>, tz: Tz) -> bool {
    date1.with_timezone(&tz).date_naive() == date2.with_timezone(&tz).date_naive()
}

/// Local midnight of the day containing `date`.
pub fn start_of_day(date: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    local_midnight(tz, date.with_timezone(&tz).date_naive())
}

/// Elapsed minutes since the local midnight of `date`'s day.
pub fn minutes_of_day(date: DateTime<Utc>, tz: Tz) -> i64 {
    (date - start_of_day(date, tz)).num_minutes()
}

/// A day anchor plus an elapsed-minute offset.
pub fn day_add_minutes(day_start: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    day_start + Duration::minutes(minutes)
}

/// Midnights of the week containing `date`, Sunday first.
pub fn week_dates(date: DateTime<Utc>, tz: Tz) -> [DateTime<Utc>; 7] {
    let local = date.with_timezone(&tz);
    let sunday = local.date_naive()
        - Days::new(u64::from(local.weekday().num_days_from_sunday()));
    std::array::from_fn(|i| local_midnight(tz, sunday + Days::new(i as u64)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::UTC;

    fn utc_dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_minutes_of_day() {
        let dt = utc_dt(2025, 1, 15, 9, 30);
        assert_eq!(minutes_of_day(dt, UTC), 9 * 60 + 30);
    }

    #[test]
    fn test_minutes_of_day_respects_zone() {
        let tz: Tz = "Europe/Paris".parse().unwrap();
        // 09:30 UTC is 10:30 in Paris in January
        let dt = utc_dt(2025, 1, 15, 9, 30);
        assert_eq!(minutes_of_day(dt, tz), 10 * 60 + 30);
    }

    #[test]
    fn test_day_add_minutes_roundtrip() {
        let day = start_of_day(utc_dt(2025, 1, 15, 12, 0), UTC);
        let dt = day_add_minutes(day, 570);
        assert_eq!(minutes_of_day(dt, UTC), 570);
    }

    #[test]
    fn test_week_dates_starts_sunday() {
        // 2025-01-15 is a Wednesday
        let week = week_dates(utc_dt(2025, 1, 15, 12, 0), UTC);
        assert_eq!(week[0].date_naive().to_string(), "2025-01-12");
        assert_eq!(week[3].date_naive().to_string(), "2025-01-15");
        assert_eq!(week[6].date_naive().to_string(), "2025-01-18");
        for day in &week {
            assert_eq!(minutes_of_day(*day, UTC), 0);
        }
    }

    #[test]
    fn test_is_same_day() {
        assert!(is_same_day(
            utc_dt(2025, 1, 15, 0, 0),
            utc_dt(2025, 1, 15, 23, 59),
            UTC
        ));
        assert!(!is_same_day(
            utc_dt(2025, 1, 15, 23, 59),
            utc_dt(2025, 1, 16, 0, 0),
            UTC
        ));
    }

    #[test]
    fn test_local_midnight_dst_gap() {
        // Brazil (historically) sprang forward at midnight; midnight did not
        // exist on 2017-10-15 and resolved to 01:00 local time.
        let tz: Tz = "America/Sao_Paulo".parse().unwrap();
        let midnight = local_midnight(tz, NaiveDate::from_ymd_opt(2017, 10, 15).unwrap());
        assert_eq!(
            midnight.with_timezone(&tz).date_naive().to_string(),
            "2017-10-15"
        );
    }
}
