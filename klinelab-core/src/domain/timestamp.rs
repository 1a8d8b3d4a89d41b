//! Bar timestamp parsing and serde format.
//!
//! Daily bars carry a bare date (`2024-01-02`); intraday bars carry a time of
//! day (`2024-01-02 10:30:00`). Both are held as `NaiveDateTime`; midnight is
//! written back as a bare date.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, ParseError, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a bar timestamp in any of the accepted forms.
pub fn parse(s: &str) -> Result<NaiveDateTime, ParseError> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map(|d| d.and_time(NaiveTime::MIN))
}

/// Format a bar timestamp; midnight renders as a bare date.
pub fn format(dt: &NaiveDateTime) -> String {
    if dt.num_seconds_from_midnight() == 0 {
        dt.format(DATE_FORMAT).to_string()
    } else {
        dt.format(DATETIME_FORMATS[0]).to_string()
    }
}

pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(dt))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse("2024-01-02").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(dt.num_seconds_from_midnight(), 0);
    }

    #[test]
    fn parses_intraday_forms() {
        let a = parse("2024-01-02 10:30:00").unwrap();
        let b = parse("2024-01-02T10:30:00").unwrap();
        let c = parse("2024-01-02 10:30").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.hour(), 10);
        assert_eq!(a.minute(), 30);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("02/01/2024").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn formats_midnight_as_date() {
        assert_eq!(format(&parse("2024-06-30").unwrap()), "2024-06-30");
        assert_eq!(
            format(&parse("2024-06-30 14:05:00").unwrap()),
            "2024-06-30 14:05:00"
        );
    }
}
