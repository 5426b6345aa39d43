use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};

// ── Report timestamps ─────────────────────────────────────────────────────────

/// `StartTime` / `EndTime` layout in AWS usage reports, e.g. `01/31/12 23:00:00`.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%m/%d/%y %H:%M:%S";

/// Parse a usage report timestamp, interpreting it as UTC.
///
/// Month, day and hour may be written with one or two digits.  Two-digit
/// years `00`-`68` are 20xx and `69`-`99` are 19xx, the POSIX `strptime`
/// pivot.  chrono alone puts `69` in 2069, so that year is moved back a
/// century.  Returns `None` for anything that does not match
/// [`REPORT_TIMESTAMP_FORMAT`] or names an impossible date.
pub fn parse_report_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let mut naive = NaiveDateTime::parse_from_str(s, REPORT_TIMESTAMP_FORMAT).ok()?;
    if naive.year() == 2069 {
        naive = naive.with_year(1969)?;
    }
    Some(Utc.from_utc_datetime(&naive))
}

// ── Epoch conversion ──────────────────────────────────────────────────────────

/// Milliseconds since the Unix epoch, with sub-second precision dropped.
pub fn epoch_millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp() * 1000
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_report_timestamp_basic() {
        let dt = parse_report_timestamp("01/31/12 23:05:00").unwrap();
        assert_eq!(dt.year(), 2012);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 31);
        assert_eq!(dt.hour(), 23);
        assert_eq!(dt.minute(), 5);
    }

    #[test]
    fn test_parse_report_timestamp_single_digits() {
        let dt = parse_report_timestamp("1/5/12 3:04:00").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour(), dt.minute()), (1, 5, 3, 4));
    }

    #[test]
    fn test_parse_report_timestamp_century_pivot() {
        assert_eq!(parse_report_timestamp("06/01/12 00:00:00").unwrap().year(), 2012);
        assert_eq!(parse_report_timestamp("06/01/99 00:00:00").unwrap().year(), 1999);
        assert_eq!(parse_report_timestamp("01/01/70 00:00:00").unwrap().year(), 1970);
    }

    #[test]
    fn test_parse_report_timestamp_pivot_boundary() {
        assert_eq!(parse_report_timestamp("06/01/68 00:00:00").unwrap().year(), 2068);
        let dt = parse_report_timestamp("12/31/69 23:59:00").unwrap();
        assert_eq!(dt.year(), 1969);
        assert_eq!(epoch_millis(dt), -60_000);
    }

    #[test]
    fn test_parse_report_timestamp_rejects_out_of_range() {
        assert!(parse_report_timestamp("13/01/12 00:00:00").is_none());
        assert!(parse_report_timestamp("02/30/12 00:00:00").is_none());
        assert!(parse_report_timestamp("01/01/12 24:00:00").is_none());
    }

    #[test]
    fn test_parse_report_timestamp_rejects_other_formats() {
        assert!(parse_report_timestamp("").is_none());
        assert!(parse_report_timestamp("2012-01-01T00:00:00Z").is_none());
        assert!(parse_report_timestamp("01/01/12").is_none());
    }

    #[test]
    fn test_epoch_millis_at_epoch() {
        let dt = parse_report_timestamp("01/01/70 00:00:00").unwrap();
        assert_eq!(epoch_millis(dt), 0);
        let dt = parse_report_timestamp("01/01/70 00:01:00").unwrap();
        assert_eq!(epoch_millis(dt), 60_000);
    }

    #[test]
    fn test_epoch_millis_drops_subseconds() {
        let dt = DateTime::from_timestamp(90, 750_000_000).unwrap();
        assert_eq!(epoch_millis(dt), 90_000);
    }
}
