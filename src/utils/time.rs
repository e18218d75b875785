// src/utils/time.rs

//! Timezone-correct timestamp handling.
//!
//! Notice dates on the source site are stated in Korean local time without
//! an explicit offset, while deployment hosts may run under any system
//! timezone. Every operation here works against explicitly constructed
//! zone definitions (KST or UTC) and never consults ambient OS locale
//! state.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{AppError, Result};

/// Fixed textual format for parse/format round-trips.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Two-digit-year date format used on the source site's detail pages.
const SITE_DATE_FORMAT: &str = "%y.%m.%d";

const REGIONAL_OFFSET_SECS: i32 = 9 * 3600;

/// The fixed regional zone (KST, UTC+9).
pub fn regional_zone() -> FixedOffset {
    FixedOffset::east_opt(REGIONAL_OFFSET_SECS).expect("valid fixed offset")
}

/// The UTC zone as a `FixedOffset` so both conventions share one type.
pub fn utc_zone() -> FixedOffset {
    FixedOffset::east_opt(0).expect("valid fixed offset")
}

fn zone(utc: bool) -> FixedOffset {
    if utc { utc_zone() } else { regional_zone() }
}

/// Current instant attached to either the regional zone or UTC.
pub fn now(utc: bool) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&zone(utc))
}

/// Parse `YYYY-MM-DD HH:MM:SS` text and attach the requested zone.
pub fn parse(text: &str, utc: bool) -> Result<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .map_err(|e| AppError::format(format!("'{text}': {e}")))?;
    Ok(attach(naive, zone(utc)))
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` after converting to the
/// requested zone. Inverse of [`parse`] for the same `utc` flag.
pub fn format(ts: &DateTime<FixedOffset>, utc: bool) -> String {
    ts.with_timezone(&zone(utc)).format(DATETIME_FORMAT).to_string()
}

/// Re-anchor an instant to the regional zone.
pub fn to_regional(ts: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    ts.with_timezone(&regional_zone())
}

/// Re-anchor an instant to UTC.
pub fn to_utc(ts: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    ts.with_timezone(&utc_zone())
}

/// Parse the site's `YY.MM.DD` date as regional-zone midnight.
pub fn parse_site_date(text: &str) -> Result<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(text.trim(), SITE_DATE_FORMAT)
        .map_err(|e| AppError::format(format!("'{text}': {e}")))?;
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    Ok(attach(midnight, regional_zone()))
}

fn attach(naive: NaiveDateTime, zone: FixedOffset) -> DateTime<FixedOffset> {
    // Fixed offsets map every local time to exactly one instant.
    zone.from_local_datetime(&naive)
        .single()
        .expect("fixed-offset local times are unambiguous")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_round_trip_utc() {
        let text = "2025-03-14 09:30:00";
        assert_eq!(format(&parse(text, true).unwrap(), true), text);
    }

    #[test]
    fn test_round_trip_regional() {
        let text = "2025-12-31 23:59:59";
        assert_eq!(format(&parse(text, false).unwrap(), false), text);
    }

    #[test]
    fn test_parse_rejects_bad_format() {
        assert!(matches!(
            parse("2025/03/14 09:30:00", false),
            Err(AppError::Format(_))
        ));
        assert!(matches!(parse("not a date", true), Err(AppError::Format(_))));
    }

    #[test]
    fn test_regional_is_nine_hours_ahead_of_utc() {
        // Same instant, wall-clock difference equal to the fixed offset,
        // regardless of host timezone settings.
        let utc = now(true);
        let regional = to_regional(&utc);
        assert_eq!(regional, utc);
        assert_eq!(
            regional.naive_local() - utc.naive_local(),
            Duration::hours(9)
        );
    }

    #[test]
    fn test_now_carries_requested_offset() {
        assert_eq!(now(false).offset().local_minus_utc(), 9 * 3600);
        assert_eq!(now(true).offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_zone_conversion_preserves_instant() {
        let regional = parse("2025-01-01 09:00:00", false).unwrap();
        let utc = to_utc(&regional);
        assert_eq!(format(&utc, true), "2025-01-01 00:00:00");
        assert_eq!(to_regional(&utc), regional);
    }

    #[test]
    fn test_parse_site_date_midnight_regional() {
        let ts = parse_site_date("25.03.14").unwrap();
        assert_eq!(format(&ts, false), "2025-03-14 00:00:00");
        assert_eq!(ts.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_parse_site_date_trims_whitespace() {
        let ts = parse_site_date(" 24.01.02 ").unwrap();
        assert_eq!(format(&ts, false), "2024-01-02 00:00:00");
    }

    #[test]
    fn test_parse_site_date_rejects_full_year() {
        assert!(parse_site_date("2025.03.14").is_err());
    }
}
