//! Field coercion for loosely-typed CSV text.
//!
//! Missing means absent, empty, or whitespace-only. Catalog fields treat a
//! present but non-numeric value as a row defect ([`NotNumeric`]); chart
//! fields fall back to zero instead.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// A present field that does not hold a usable number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("non-numeric value {value:?} in {field}")]
pub struct NotNumeric {
    pub field: &'static str,
    pub value: String,
}

/// Trim a raw field, mapping empty text to `None`.
pub fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Coerce a field to a non-negative integer.
///
/// Missing and `NaN` give 0, negatives clamp to 0, decimals truncate.
pub fn count_field(field: &'static str, raw: Option<&str>) -> Result<u64, NotNumeric> {
    let Some(text) = present(raw) else {
        return Ok(0);
    };
    if let Ok(n) = text.parse::<u64>() {
        return Ok(n);
    }
    if text.parse::<i64>().is_ok() {
        // Only negatives get here.
        return Ok(0);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(0),
        Ok(v) if v.is_finite() => Ok(if v <= 0.0 { 0 } else { v.trunc() as u64 }),
        _ => Err(NotNumeric {
            field,
            value: text.to_string(),
        }),
    }
}

/// Coerce a field to a finite float. Missing and `NaN` give 0.0.
pub fn measure_field(field: &'static str, raw: Option<&str>) -> Result<f64, NotNumeric> {
    let Some(text) = present(raw) else {
        return Ok(0.0);
    };
    match text.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(0.0),
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(NotNumeric {
            field,
            value: text.to_string(),
        }),
    }
}

/// Coerce a chart field to a non-negative integer, using 0 for anything unusable.
pub fn lenient_count(raw: Option<&str>) -> u32 {
    count_field("", raw)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a chart date. Timestamps are truncated to their calendar date.
///
/// Returns `None` for anything that is not a valid date; callers drop the row.
pub fn parse_chart_date(raw: Option<&str>) -> Option<NaiveDate> {
    let text = present(raw)?;

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.date_naive())
}
