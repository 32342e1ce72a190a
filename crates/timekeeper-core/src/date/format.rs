use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use regex::Regex;

use crate::error::ParseError;

/// How the offset part of a layout is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    /// No offset in the string: wall-clock, uninterpreted.
    Naive,
    /// Literal `Z` suffix.
    Utc,
    /// Numeric `+hh:mm` / `-hh:mm` suffix.
    Numeric,
}

// Fixed-width fields only; chrono alone would take `2023:6:5` or a leading sign.
// Every layout allows an optional fraction after the seconds.
static COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}:\d{2}:\d{2} \d{2}:\d{2}:\d{2}(\.\d{1,9})?$").unwrap());
static COLON_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}:\d{2}:\d{2} \d{2}:\d{2}:\d{2}(\.\d{1,9})?[+-]\d{2}:\d{2}$").unwrap()
});
static COLON_Z: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}:\d{2}:\d{2} \d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$").unwrap());
static DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(\.\d{1,9})?$").unwrap());
static ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?$").unwrap());
static ISO_Z: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$").unwrap());
static ISO_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?[+-]\d{2}:\d{2}$").unwrap()
});

struct DateLayout {
    shape: &'static LazyLock<Regex>,
    format: &'static str,
    zone: Zone,
}

/// Tried in order, first match wins. ExifTool's own layout comes first.
static LAYOUTS: &[DateLayout] = &[
    DateLayout { shape: &COLON, format: "%Y:%m:%d %H:%M:%S%.f", zone: Zone::Naive },
    DateLayout { shape: &COLON_OFFSET, format: "%Y:%m:%d %H:%M:%S%.f%:z", zone: Zone::Numeric },
    DateLayout { shape: &COLON_Z, format: "%Y:%m:%d %H:%M:%S%.fZ", zone: Zone::Utc },
    DateLayout { shape: &DASH, format: "%Y-%m-%d %H:%M:%S%.f", zone: Zone::Naive },
    DateLayout { shape: &ISO, format: "%Y-%m-%dT%H:%M:%S%.f", zone: Zone::Naive },
    DateLayout { shape: &ISO_Z, format: "%Y-%m-%dT%H:%M:%S%.fZ", zone: Zone::Utc },
    DateLayout { shape: &ISO_OFFSET, format: "%Y-%m-%dT%H:%M:%S%.f%:z", zone: Zone::Numeric },
];

/// A parsed capture time.
///
/// `local` is the wall-clock exactly as written; `offset` is present only
/// when the source string carried one. Nothing is normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    pub local: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl Timestamp {
    pub fn naive(local: NaiveDateTime) -> Self {
        Self { local, offset: None }
    }

    pub fn with_offset(dt: DateTime<FixedOffset>) -> Self {
        Self {
            local: dt.naive_local(),
            offset: Some(*dt.offset()),
        }
    }

    /// Offset-aware view, when an offset is known.
    pub fn fixed(&self) -> Option<DateTime<FixedOffset>> {
        let offset = self.offset?;
        self.local.and_local_timezone(offset).single()
    }

    /// Render with a chrono pattern. Offset specifiers are only valid when
    /// an offset is known.
    pub fn format(&self, pattern: &str) -> String {
        match self.fixed() {
            Some(dt) => dt.format(pattern).to_string(),
            None => self.local.format(pattern).to_string(),
        }
    }
}

/// Parse a raw date string against the known layouts.
pub fn parse_date(raw: &str) -> Result<Timestamp, ParseError> {
    let s = raw.trim();

    for layout in LAYOUTS {
        if !layout.shape.is_match(s) {
            continue;
        }
        let parsed = match layout.zone {
            Zone::Naive => NaiveDateTime::parse_from_str(s, layout.format)
                .ok()
                .map(Timestamp::naive),
            Zone::Utc => NaiveDateTime::parse_from_str(s, layout.format)
                .ok()
                .map(|dt| Timestamp::with_offset(dt.and_utc().fixed_offset())),
            Zone::Numeric => DateTime::parse_from_str(s, layout.format)
                .ok()
                .map(Timestamp::with_offset),
        };
        if let Some(ts) = parsed {
            return Ok(ts);
        }
    }

    Err(ParseError {
        input: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_exiftool_layout() {
        let ts = parse_date("2023:06:15 10:30:00").unwrap();
        assert_eq!(ts.offset, None);
        assert_eq!(ts.local.year(), 2023);
        assert_eq!(ts.local.month(), 6);
        assert_eq!(ts.format("%Y:%m:%d %H:%M:%S"), "2023:06:15 10:30:00");
    }

    #[test]
    fn test_round_trip_all_layouts() {
        let cases = [
            ("2023:06:15 10:30:00", "%Y:%m:%d %H:%M:%S"),
            ("2023:06:15 10:30:00+02:00", "%Y:%m:%d %H:%M:%S%:z"),
            ("2023:06:15 10:30:00-07:00", "%Y:%m:%d %H:%M:%S%:z"),
            ("2023:06:15 10:30:00Z", "%Y:%m:%d %H:%M:%SZ"),
            ("2021-12-31 23:59:59", "%Y-%m-%d %H:%M:%S"),
            ("2021-12-31T23:59:59", "%Y-%m-%dT%H:%M:%S"),
            ("2021-12-31T23:59:59Z", "%Y-%m-%dT%H:%M:%SZ"),
            ("2021-12-31T23:59:59+09:00", "%Y-%m-%dT%H:%M:%S%:z"),
        ];
        for (input, pattern) in cases {
            let ts = parse_date(input).unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(ts.format(pattern), input);
        }
    }

    #[test]
    fn test_offset_keeps_wall_clock() {
        // 23:30 at -05:00 is already the next day in UTC; bucketing must not move it.
        let ts = parse_date("2021-12-31T23:30:00-05:00").unwrap();
        assert_eq!(ts.local.year(), 2021);
        assert_eq!(ts.local.month(), 12);
        assert_eq!(ts.offset, FixedOffset::west_opt(5 * 3600));
    }

    #[test]
    fn test_utc_suffix() {
        let ts = parse_date("2020-02-29T12:00:00Z").unwrap();
        assert_eq!(ts.offset, FixedOffset::east_opt(0));
    }

    #[test]
    fn test_fractional_seconds() {
        let ts = parse_date("2023:06:15 10:30:00.123").unwrap();
        assert_eq!(ts.offset, None);
        assert_eq!(ts.local.and_utc().timestamp_subsec_millis(), 123);
        assert_eq!(ts.format("%Y:%m:%d %H:%M:%S%.3f"), "2023:06:15 10:30:00.123");

        let ts = parse_date("2023:06:15 10:30:00.50+02:00").unwrap();
        assert_eq!(ts.offset, FixedOffset::east_opt(2 * 3600));
        assert_eq!(ts.local.and_utc().timestamp_subsec_millis(), 500);
        assert_eq!(ts.local.month(), 6);

        let ts = parse_date("2023-06-15T10:30:00.000Z").unwrap();
        assert_eq!(ts.offset, FixedOffset::east_opt(0));
        assert_eq!(ts.format("%Y-%m-%dT%H:%M:%SZ"), "2023-06-15T10:30:00Z");
    }

    #[test]
    fn test_fields_must_be_fixed_width() {
        for input in [
            "2023:6:5 1:2:3",
            "+2023:06:15 10:30:00",
            "-2023-06-15T10:30:00",
            "023:06:15 10:30:00",
            "2023:06:15 10:30:00.",
            "2023:06:15 10:30:00+2:00",
            "2023-06-15T10:30:00.1234567890Z",
        ] {
            assert!(parse_date(input).is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert!(parse_date("  2023:06:15 10:30:00\n").is_ok());
    }

    #[test]
    fn test_unrecognized() {
        for input in [
            "",
            "not a date",
            "0000:00:00 00:00:00",
            "2023:13:01 00:00:00",
            "2023/06/15 10:30:00",
            "2023:06:15",
            "2023:06:15 10:30:00 extra",
        ] {
            let err = parse_date(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }
}
