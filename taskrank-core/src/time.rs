//! Reference-date helpers: "today" in a configured time zone.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Parse an IANA zone name like "America/Chicago".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Calendar date of `now` as seen in `tz`.
pub fn date_in_timezone(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz = parse_timezone(tz)?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Today's date in `tz`.
pub fn today_in_timezone(tz: &str) -> Result<NaiveDate> {
    date_in_timezone(Utc::now(), tz)
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_rolls_back_west_of_utc() {
        // 03:00 UTC is still the previous evening in Chicago (CST, UTC-6)
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 3, 0, 0).unwrap();
        let d = date_in_timezone(now, "America/Chicago").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
        assert_eq!(
            date_in_timezone(now, "UTC").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 21).unwrap()
        );
    }

    #[test]
    fn test_invalid_timezone() {
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-02-20").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 20).unwrap()
        );
        assert!(parse_date("02/20/2026").is_err());
    }
}
