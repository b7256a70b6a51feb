//! Date normalization for loosely formatted record dates.
//!
//! A record date may be absent, a sentinel (`ongoing` / `current`), a
//! parseable calendar date in one of several common spellings, or free text.
//! Normalization never fails: anything that is not a calendar date falls
//! back to "today" for the machine formats.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

const SENTINELS: [&str; 2] = ["ongoing", "current"];
const ONGOING_DISPLAY: &str = "Ongoing";

const CITATION_FORMAT: &str = "%Y/%m/%d";
const ISO_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%B %-d, %Y";

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Source of "today" for fallback dates.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the running system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// How a raw date string was understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    Absent,
    Ongoing,
    Parsed,
    Unparseable,
}

/// The three presentation formats of one record date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDate {
    pub kind: DateKind,
    /// Calendar day the input denotes; `None` unless `kind` is `Parsed`.
    pub parsed: Option<NaiveDate>,
    /// `YYYY/MM/DD`, for `citation_*` tags.
    pub citation: String,
    /// `YYYY-MM-DD`, for schema.org, Dublin Core and sitemap `lastmod`.
    pub iso: String,
    /// Long human form, `Ongoing`, the raw text, or empty when absent.
    pub display: String,
}

pub fn is_sentinel(raw: &str) -> bool {
    let normalized = raw.trim().to_ascii_lowercase();
    SENTINELS.contains(&normalized.as_str())
}

/// chrono's `%Y` takes any digit count, so `March 2024` also reads as
/// day 20 of year 24 under `%B %d %Y`. Only four-digit years count.
fn four_digit_year(date: NaiveDate) -> Option<NaiveDate> {
    (1000..=9999).contains(&date.year()).then_some(date)
}

/// Parse `raw` as a calendar date, ignoring surrounding whitespace.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .and_then(|timestamp| four_digit_year(timestamp.date_naive()))
    {
        return Some(date);
    }
    for format in DATETIME_FORMATS {
        if let Some(date) = NaiveDateTime::parse_from_str(trimmed, format)
            .ok()
            .and_then(|timestamp| four_digit_year(timestamp.date()))
        {
            return Some(date);
        }
    }
    for format in DATE_FORMATS {
        if let Some(date) = NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .and_then(four_digit_year)
        {
            return Some(date);
        }
    }

    // Month precision: first of the month.
    let month_candidates = [
        (format!("{trimmed}-01"), "%Y-%m-%d"),
        (format!("{trimmed} 1"), "%B %Y %d"),
    ];
    for (candidate, format) in &month_candidates {
        if let Some(date) = NaiveDate::parse_from_str(candidate, format)
            .ok()
            .and_then(four_digit_year)
        {
            return Some(date);
        }
    }

    // Year precision: January 1.
    if trimmed.len() == 4
        && trimmed.chars().all(|c| c.is_ascii_digit())
        && let Ok(year) = trimmed.parse::<i32>()
    {
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

/// Normalize an optional raw date against `clock`.
pub fn normalize_date(raw: Option<&str>, clock: &dyn Clock) -> NormalizedDate {
    let raw = raw.filter(|value| !value.is_empty());

    let (kind, parsed) = match raw {
        None => (DateKind::Absent, None),
        Some(value) if is_sentinel(value) => (DateKind::Ongoing, None),
        Some(value) => match parse_date(value) {
            Some(date) => (DateKind::Parsed, Some(date)),
            None => {
                log::warn!("event=date_unparseable module=date raw={value:?}");
                (DateKind::Unparseable, None)
            }
        },
    };

    let day = parsed.unwrap_or_else(|| clock.today());
    let display = match (kind, parsed) {
        (DateKind::Absent, _) => String::new(),
        (DateKind::Ongoing, _) => ONGOING_DISPLAY.to_string(),
        (DateKind::Parsed, Some(date)) => date.format(DISPLAY_FORMAT).to_string(),
        _ => raw.unwrap_or_default().to_string(),
    };

    NormalizedDate {
        kind,
        parsed,
        citation: day.format(CITATION_FORMAT).to_string(),
        iso: day.format(ISO_FORMAT).to_string(),
        display,
    }
}

/// ISO form of the clock's current day.
pub fn today_iso(clock: &dyn Clock) -> String {
    clock.today().format(ISO_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date"))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn iso_date_yields_consistent_formats() {
        let date = normalize_date(Some("2024-03-05"), &clock());
        assert_eq!(date.kind, DateKind::Parsed);
        assert_eq!(date.citation, "2024/03/05");
        assert_eq!(date.iso, "2024-03-05");
        assert_eq!(date.display, "March 5, 2024");
    }

    #[test]
    fn common_spellings_parse_to_the_same_day() {
        for raw in [
            "2025-10-07",
            "2025/10/07",
            "10/07/2025",
            "October 7, 2025",
            "Oct 7, 2025",
            "october 7 2025",
            "7 October 2025",
            "2025-10-07T23:30:00Z",
            "2025-10-07T09:15:00",
            "  2025-10-07  ",
        ] {
            assert_eq!(parse_date(raw), Some(ymd(2025, 10, 7)), "input {raw:?}");
        }
    }

    #[test]
    fn month_and_year_precision_round_down() {
        assert_eq!(parse_date("2024-03"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_date("March 2024"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_date("Mar 2024"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_date(" november 2023 "), Some(ymd(2023, 11, 1)));
        assert_eq!(parse_date("2023"), Some(ymd(2023, 1, 1)));
    }

    #[test]
    fn short_years_never_land_in_the_first_millennium() {
        assert_eq!(parse_date("3/5/24"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("12/31/99"), Some(ymd(1999, 12, 31)));
        assert_eq!(parse_date("24-03-05"), None);
        assert_eq!(parse_date("March 5, 24"), None);

        let date = normalize_date(Some("March 2024"), &clock());
        assert_eq!(date.kind, DateKind::Parsed);
        assert_eq!(date.citation, "2024/03/01");
        assert_eq!(date.display, "March 1, 2024");
    }

    #[test]
    fn sentinels_are_case_and_whitespace_insensitive() {
        for raw in ["ongoing", " Ongoing ", "CURRENT", "current\n"] {
            let date = normalize_date(Some(raw), &clock());
            assert_eq!(date.kind, DateKind::Ongoing, "input {raw:?}");
            assert_eq!(date.citation, "2026/01/15");
            assert_eq!(date.iso, "2026-01-15");
            assert_eq!(date.display, "Ongoing");
            assert_eq!(date.parsed, None);
        }
    }

    #[test]
    fn unparseable_falls_back_to_today_and_echoes_raw() {
        let date = normalize_date(Some("Spring-ish 2024?"), &clock());
        assert_eq!(date.kind, DateKind::Unparseable);
        assert_eq!(date.citation, "2026/01/15");
        assert_eq!(date.iso, "2026-01-15");
        assert_eq!(date.display, "Spring-ish 2024?");
    }

    #[test]
    fn absent_and_empty_use_today_with_blank_display() {
        for raw in [None, Some("")] {
            let date = normalize_date(raw, &clock());
            assert_eq!(date.kind, DateKind::Absent);
            assert_eq!(date.iso, "2026-01-15");
            assert_eq!(date.display, "");
        }
    }

    #[test]
    fn invalid_calendar_days_are_unparseable() {
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("13/45/2024"), None);
    }

    #[test]
    fn today_iso_uses_the_clock() {
        assert_eq!(today_iso(&clock()), "2026-01-15");
    }
}
