use std::fmt::Write;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ChartError, ChartResult};

/// Formats a date with a `strftime` pattern.
///
/// Patterns that need fields a calendar date does not carry (`%H`, `%z`, ...)
/// are rejected instead of producing a partial label.
pub fn format_date_label(date: NaiveDate, pattern: &str) -> ChartResult<String> {
    let mut label = String::new();
    write!(label, "{}", date.format(pattern)).map_err(|_| {
        ChartError::InvalidConfig(format!(
            "date format `{pattern}` cannot be applied to a calendar date"
        ))
    })?;
    Ok(label)
}

/// Formats a NAV value with fixed decimals and an optional currency prefix.
///
/// Rounds half away from zero, so `12.345` at precision 2 becomes `12.35`.
#[must_use]
pub fn format_value_label(value: Decimal, precision: u32, prefix: &str) -> String {
    let mut rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(precision);
    format!("{prefix}{rounded}")
}

/// Rough label width used to size tooltip boxes without a text shaper.
#[must_use]
pub(super) fn estimate_label_width(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * 0.6
}
