//! Calendar-date helpers. Everything else in the crate goes through these functions for date
//! parsing, formatting, comparison and month arithmetic.

use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Datelike, Days, NaiveDate};
use std::cmp::Ordering;

/// The day-month-year format used for transaction dates, e.g. `06.05.2018`.
pub const DMY: &str = "%d.%m.%Y";

/// The format used for the selected date in the snapshot, e.g. `2018-05-06`.
pub const ISO: &str = "%Y-%m-%d";

/// Parses a `DD.MM.YYYY` date.
pub fn parse(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DMY)
        .with_context(|| format!("'{text}' is not a DD.MM.YYYY date"))
}

/// Formats a date as `DD.MM.YYYY`.
pub fn format(date: NaiveDate) -> String {
    date.format(DMY).to_string()
}

/// Parses the selected date of a snapshot. Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, in
/// which case the calendar date in the timestamp's own offset is used.
pub fn parse_selected(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, ISO) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(text)
        .map(|timestamp| timestamp.date_naive())
        .with_context(|| format!("'{text}' is neither a YYYY-MM-DD date nor an RFC 3339 timestamp"))
}

/// Orders two dates at day granularity.
pub fn compare(a: NaiveDate, b: NaiveDate) -> Ordering {
    a.cmp(&b)
}

/// The number of days in the month that `date` falls in.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (date.with_day(1), first_of_next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        // December of the last representable year
        _ => 31,
    }
}

/// Whether `a` and `b` are in the same calendar month of the same year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Moves `date` by `days` whole days. Saturates at the ends of the representable range.
pub fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Serde adapter for `DD.MM.YYYY` dates.
pub(crate) mod dmy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(*date))
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for the selected date: written as `YYYY-MM-DD`, read with `parse_selected`.
pub(crate) mod selected {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(super::ISO).to_string())
    }

    /// A `null` date is the same as a missing one and selects today.
    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => super::parse_selected(&s).map_err(serde::de::Error::custom),
            None => Ok(crate::model::today()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_and_format_dmy() {
        let date = parse("06.05.2018").unwrap();
        assert_eq!(date, d(2018, 5, 6));
        assert_eq!(format(date), "06.05.2018");
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(parse("2018-05-06").is_err());
        assert!(parse("31.02.2018").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_parse_selected_iso() {
        assert_eq!(parse_selected("2018-05-06").unwrap(), d(2018, 5, 6));
    }

    #[test]
    fn test_parse_selected_rfc3339_uses_its_own_offset() {
        // 01:30 at UTC+03:00 is still the 5th in UTC
        assert_eq!(
            parse_selected("2018-05-06T01:30:00+03:00").unwrap(),
            d(2018, 5, 6)
        );
        // 22:10 at UTC-05:00 is already the 7th in UTC
        assert_eq!(
            parse_selected("2018-05-06T22:10:00-05:00").unwrap(),
            d(2018, 5, 6)
        );
    }

    #[test]
    fn test_parse_selected_garbage() {
        assert!(parse_selected("yesterday").is_err());
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(d(2020, 1, 1), d(2020, 1, 2)), Ordering::Less);
        assert_eq!(compare(d(2020, 1, 2), d(2020, 1, 2)), Ordering::Equal);
        assert_eq!(compare(d(2021, 1, 1), d(2020, 12, 31)), Ordering::Greater);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(d(2023, 1, 15)), 31);
        assert_eq!(days_in_month(d(2023, 2, 1)), 28);
        assert_eq!(days_in_month(d(2024, 2, 29)), 29);
        assert_eq!(days_in_month(d(2023, 4, 30)), 30);
        assert_eq!(days_in_month(d(2023, 12, 31)), 31);
        assert_eq!(days_in_month(NaiveDate::MAX), 31);
    }

    #[test]
    fn test_same_month() {
        assert!(same_month(d(2023, 3, 1), d(2023, 3, 31)));
        assert!(!same_month(d(2023, 3, 1), d(2023, 4, 1)));
        assert!(!same_month(d(2023, 3, 1), d(2024, 3, 1)));
    }

    #[test]
    fn test_shift_crosses_month_and_year() {
        assert_eq!(shift(d(2023, 1, 31), 1), d(2023, 2, 1));
        assert_eq!(shift(d(2023, 1, 1), -1), d(2022, 12, 31));
        assert_eq!(shift(d(2024, 2, 28), 1), d(2024, 2, 29));
        assert_eq!(shift(d(2023, 5, 5), 0), d(2023, 5, 5));
    }

    #[test]
    fn test_shift_saturates() {
        assert_eq!(shift(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(shift(NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(shift(d(2023, 1, 1), i64::MAX), NaiveDate::MAX);
        assert_eq!(shift(d(2023, 1, 1), i64::MIN), NaiveDate::MIN);
    }
}
