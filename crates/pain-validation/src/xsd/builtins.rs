//! Lexical checks for XML Schema built-in types

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").expect("Invalid decimal regex"));
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("Invalid integer regex"));
static GYEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d{4,}(Z|[+-]\d{2}:\d{2})?$").expect("Invalid gYear regex")
});
static BASE64: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9+/]{4})*([A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
        .expect("Invalid base64 regex")
});

/// Whether the built-in type keeps whitespace as written
pub(crate) fn preserves_whitespace(name: &str) -> bool {
    matches!(name, "string" | "anySimpleType" | "anyType")
}

/// Check `value` against a built-in type; unknown built-ins accept anything
pub(crate) fn check_builtin(name: &str, value: &str) -> Result<(), String> {
    let ok = match name {
        "decimal" => DECIMAL.is_match(value),
        "integer" | "int" | "long" | "short" | "byte" => INTEGER.is_match(value),
        "nonNegativeInteger" | "unsignedInt" | "unsignedLong" => {
            INTEGER.is_match(value) && !value.starts_with('-')
        }
        "positiveInteger" => {
            INTEGER.is_match(value)
                && !value.starts_with('-')
                && value.trim_start_matches('+').trim_start_matches('0') != ""
        }
        "boolean" => matches!(value, "true" | "false" | "1" | "0"),
        "date" => check_date(value),
        "dateTime" => check_date_time(value),
        "time" => check_time(value),
        "gYear" => GYEAR.is_match(value),
        "base64Binary" => BASE64.is_match(value),
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        Err(format!("'{value}' is not a valid xs:{name}"))
    }
}

/// Remove a trailing `Z` or `+hh:mm`/`-hh:mm` zone.
///
/// `None` when the zone is present but malformed or outside `-14:00..=+14:00`.
fn strip_zone(value: &str) -> Option<&str> {
    if let Some(head) = value.strip_suffix('Z') {
        return Some(head);
    }
    let Some(split) = value.len().checked_sub(6) else {
        return Some(value);
    };
    if split == 0 || !value.is_char_boundary(split) {
        return Some(value);
    }
    let (head, zone) = value.split_at(split);
    let Some(offset) = zone.strip_prefix(['+', '-']) else {
        return Some(value);
    };
    if offset.as_bytes()[2] != b':' {
        return Some(value);
    }
    let (hours, minutes) = (&offset[..2], &offset[3..]);
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    match (hours.parse::<u8>(), minutes.parse::<u8>()) {
        (Ok(h), Ok(m)) if m <= 59 && (h < 14 || (h == 14 && m == 0)) => Some(head),
        _ => None,
    }
}

fn check_date(value: &str) -> bool {
    strip_zone(value).is_some_and(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok())
}

fn check_time(value: &str) -> bool {
    strip_zone(value).is_some_and(|time| {
        NaiveTime::parse_from_str(time, "%H:%M:%S%.f").is_ok() || is_end_of_day(time)
    })
}

fn check_date_time(value: &str) -> bool {
    let Some((date, time)) = value.split_once('T') else {
        return false;
    };
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() && check_time(time)
}

/// `24:00:00`, optionally with an all-zero fraction
fn is_end_of_day(time: &str) -> bool {
    match time.strip_prefix("24:00:00") {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('.')
            .is_some_and(|fraction| !fraction.is_empty() && fraction.bytes().all(|b| b == b'0')),
        None => false,
    }
}
