//! Naive (offset-less) timestamps as the API sends them.
//!
//! Time entries carry ISO-8601 without an offset (`2024-03-01T09:15:00.123456`),
//! tasks carry a pre-formatted `2024-03-01 09:15`. Both are server-local
//! wall-clock times.

use serde::{de, Deserialize, Deserializer, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::PrimitiveDateTime;

const ISO_WITH_SUBSECOND: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
const ISO: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const ISO_MINUTES: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");
const SPACED_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const SPACED_MINUTES: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

const ACCEPTED: [&[BorrowedFormatItem<'static>]; 5] = [
    ISO_WITH_SUBSECOND,
    ISO,
    ISO_MINUTES,
    SPACED_SECONDS,
    SPACED_MINUTES,
];

/// Parse any of the timestamp shapes the API produces.
pub fn parse(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();
    ACCEPTED
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(raw, format).ok())
}

/// Format a timestamp the way the API accepts it.
pub fn format(value: &PrimitiveDateTime) -> String {
    value
        .format(ISO)
        .unwrap_or_else(|_| value.to_string())
}

pub fn serialize<S>(value: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognised timestamp `{}`", raw)))
}

pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<PrimitiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_some(&super::format(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PrimitiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("unrecognised timestamp `{}`", raw))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_python_isoformat_with_microseconds() {
        assert_eq!(
            parse("2024-03-01T09:15:30.123456"),
            Some(datetime!(2024-03-01 09:15:30.123456))
        );
    }

    #[test]
    fn parses_isoformat_without_fraction() {
        assert_eq!(
            parse("2024-03-01T09:15:30"),
            Some(datetime!(2024-03-01 09:15:30))
        );
    }

    #[test]
    fn parses_task_display_format() {
        assert_eq!(
            parse("2024-03-01 09:15"),
            Some(datetime!(2024-03-01 09:15))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse("yesterday"), None);
    }

    #[test]
    fn formats_without_fraction() {
        assert_eq!(
            format(&datetime!(2024-03-01 09:15:30.5)),
            "2024-03-01T09:15:30"
        );
    }
}
