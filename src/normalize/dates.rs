//! Calendar-date rendering for provider timestamps.
//!
//! Every record stores its date as `Www Mmm DD YYYY` (e.g. `Sat Dec 22 2018`),
//! whichever timestamp format the provider used.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const CALENDAR_DATE_FORMAT: &str = "%a %b %d %Y";

/// Renders seconds since the Unix epoch as a UTC calendar date.
///
/// Returns `None` when the timestamp is outside chrono's representable range.
#[must_use]
pub fn epoch_to_calendar(seconds: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|dt| dt.format(CALENDAR_DATE_FORMAT).to_string())
}

/// Renders an ISO-8601 timestamp as a calendar date.
///
/// Accepts a naive local timestamp (`2018-12-22T19:00:00`), an RFC 3339
/// timestamp with offset (`2018-12-23T03:00:00Z`), or a bare date. Offsets are
/// not converted: the date is read in the timestamp's own zone.
#[must_use]
pub fn iso_to_calendar(value: &str) -> Option<String> {
    let value = value.trim();

    let date = if let Ok(local) = value.parse::<NaiveDateTime>() {
        local.date()
    } else if let Ok(zoned) = DateTime::parse_from_rfc3339(value) {
        zoned.date_naive()
    } else {
        value.parse::<NaiveDate>().ok()?
    };

    Some(date.format(CALENDAR_DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_seconds_render_as_utc_dates() {
        assert_eq!(
            epoch_to_calendar(1_545_436_800).as_deref(),
            Some("Sat Dec 22 2018")
        );
        assert_eq!(
            epoch_to_calendar(1_482_364_800).as_deref(),
            Some("Thu Dec 22 2016")
        );
        assert_eq!(epoch_to_calendar(0).as_deref(), Some("Thu Jan 01 1970"));
    }

    #[test]
    fn epoch_conversion_is_stable() {
        let first = epoch_to_calendar(1_545_436_800);
        let second = epoch_to_calendar(1_545_436_800);
        assert_eq!(first, second);
    }

    #[test]
    fn epoch_out_of_range_is_none() {
        assert_eq!(epoch_to_calendar(i64::MAX), None);
    }

    #[test]
    fn iso_local_timestamp() {
        assert_eq!(
            iso_to_calendar("2018-12-22T19:00:00").as_deref(),
            Some("Sat Dec 22 2018")
        );
    }

    #[test]
    fn iso_utc_timestamp_keeps_its_own_date() {
        assert_eq!(
            iso_to_calendar("2018-12-23T03:00:00Z").as_deref(),
            Some("Sun Dec 23 2018")
        );
    }

    #[test]
    fn iso_bare_date_and_padding() {
        assert_eq!(
            iso_to_calendar("2019-01-05").as_deref(),
            Some("Sat Jan 05 2019")
        );
    }

    #[test]
    fn iso_garbage_is_none() {
        assert_eq!(iso_to_calendar("next tuesday"), None);
        assert_eq!(iso_to_calendar(""), None);
    }
}
