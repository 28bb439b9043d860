//! Value coercion rules for record fields

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use pain_schema::FieldType;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Outcome of a single rule check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResult {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl RuleResult {
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

/// Presence check: absent or whitespace-only values fail
#[must_use]
pub fn validate_required(column: &str, value: Option<&str>) -> RuleResult {
    match value {
        Some(v) if !v.trim().is_empty() => RuleResult::valid(),
        _ => RuleResult::invalid(format!("Missing value for column '{column}'")),
    }
}

/// Type check for a present value
#[must_use]
pub fn validate_field_type(value: &str, field_type: FieldType) -> RuleResult {
    let ok = match field_type {
        FieldType::Integer => value.trim().parse::<i64>().is_ok(),
        FieldType::Decimal => parse_decimal(value).is_some(),
        FieldType::Boolean => parse_boolean(value).is_some(),
        FieldType::Date => parse_timestamp(value).is_some(),
        FieldType::Text => true,
    };

    if ok {
        RuleResult::valid()
    } else {
        RuleResult::invalid(format!("Value '{value}' is not a valid {field_type}"))
    }
}

/// `true`/`false`, case-insensitive
#[must_use]
pub fn parse_boolean(value: &str) -> Option<bool> {
    let lower = value.trim().to_ascii_lowercase();
    match lower.as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Plain or scientific decimal notation
#[must_use]
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// ISO-8601 date-time or bare date.
///
/// A trailing `Z` is read as `+00:00`. Offsets are dropped after parsing;
/// the wall-clock value as written is kept. A bare `YYYY-MM-DD` becomes
/// midnight.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    let normalized = match trimmed.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => trimmed.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f%:z") {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
